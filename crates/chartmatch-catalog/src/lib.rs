//! Catalog capabilities for chartmatch.
//!
//! Implements the two capabilities the matching engine consumes:
//! track search and playlist CRUD, backed by a REST catalog API.
//! Credentials are immutable values passed into the client; refresh
//! produces a new value rather than mutating shared state.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod auth;
pub mod client;
pub mod error;
pub mod playlist;
pub mod provider;
pub mod rate_limit;

pub use auth::AccessToken;
pub use client::CatalogClient;
pub use error::{CatalogError, CatalogResult};
pub use provider::SearchProvider;
pub use rate_limit::RateLimiter;
