pub mod candidate;
pub mod entry;
pub mod result;

pub use candidate::{AlbumType, Candidate};
pub use entry::{ChartEntry, ChartSource};
pub use result::{BatchSummary, MatchResult};
