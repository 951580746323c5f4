//! The search capability boundary.

use async_trait::async_trait;

use chartmatch_core::model::Candidate;

use crate::client::CatalogClient;
use crate::error::CatalogResult;

/// The abstract search capability the match engine consumes.
///
/// The engine only ever sees this trait; REST, GraphQL, or an in-memory
/// mock are all valid backends. Implementations must return candidates
/// in their native result order -- the selector uses that order for
/// tie-breaking and the UI preserves it for display.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search the catalog, returning at most `limit` candidates.
    async fn search(&self, query: &str, limit: u32) -> CatalogResult<Vec<Candidate>>;
}

#[async_trait]
impl SearchProvider for CatalogClient {
    async fn search(&self, query: &str, limit: u32) -> CatalogResult<Vec<Candidate>> {
        CatalogClient::search(self, query, limit).await
    }
}
