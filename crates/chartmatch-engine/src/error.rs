//! Engine error types.
//!
//! Only systemic failures surface here: a malformed chart entry (a
//! precondition, checked before any network call) or a credential the
//! catalog rejects outright. Per-entry transport failures are captured
//! into that entry's `MatchResult` instead and never abort a batch.

use thiserror::Error;

use chartmatch_catalog::CatalogError;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A chart entry failed validation before the pass started.
    #[error(transparent)]
    Chart(#[from] chartmatch_core::Error),

    /// The search capability is unusable for every entry (bad or
    /// expired credential). No entry could possibly succeed.
    #[error("catalog credential rejected: {0}")]
    Unauthenticated(#[source] CatalogError),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
