//! Batch matching orchestration for chartmatch.
//!
//! Drives the per-entry protocol -- structured query, search, fallback
//! query, selection -- over a ranked chart, with per-entry error
//! capture, rate pacing, transient-failure retries, and cooperative
//! cancellation.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod runner;

pub use config::Config;
pub use error::{EngineError, EngineResult};
pub use runner::{BatchReport, MatchOptions, MatchRunner};
