//! Core domain model for chartmatch.
//!
//! This crate defines the chart/candidate data model, the search query
//! builder, the string-similarity primitive, and the weighted match
//! selector. Everything here is pure and synchronous; network access
//! lives in `chartmatch-catalog` and orchestration in
//! `chartmatch-engine`.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod query;
pub mod select;
pub mod similarity;

pub use error::{Error, Result};
pub use model::{AlbumType, BatchSummary, Candidate, ChartEntry, MatchResult};
pub use query::SearchQuery;
pub use select::MatchScorer;
