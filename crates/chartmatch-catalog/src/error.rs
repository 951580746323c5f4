//! Error taxonomy for catalog operations.

use thiserror::Error;

/// Errors from the external catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog rejected the credential (401/403).
    #[error("catalog authentication failed: {message}")]
    Auth { message: String },

    /// The catalog returned a rate-limit response (429).
    #[error("rate limited by catalog")]
    RateLimited { retry_after_secs: Option<u64> },

    /// Any other non-success HTTP status.
    #[error("catalog HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// A response body could not be decoded.
    #[error("catalog response parse error: {message}")]
    Parse { message: String },

    /// An error propagated from `reqwest` (connect, timeout, TLS).
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
}

impl CatalogError {
    /// Returns `true` when the error is transient and the call may
    /// succeed if retried (server errors, rate limits, network faults).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited { .. } => true,
            Self::Http { status, .. } => *status >= 500,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            Self::Auth { .. } | Self::Parse { .. } => false,
        }
    }

    /// Returns `true` when the credential itself is the problem. An auth
    /// failure at the start of a batch is systemic: no entry can succeed.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}

/// Convenience alias for catalog results.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_is_transient() {
        let err = CatalogError::RateLimited {
            retry_after_secs: Some(2),
        };
        assert!(err.is_transient());
        assert!(!err.is_auth());
    }

    #[test]
    fn test_server_error_is_transient() {
        let err = CatalogError::Http {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn test_client_error_is_not_transient() {
        let err = CatalogError::Http {
            status: 404,
            message: "not found".to_string(),
        };
        assert!(!err.is_transient());
    }

    #[test]
    fn test_auth_error() {
        let err = CatalogError::Auth {
            message: "expired token".to_string(),
        };
        assert!(err.is_auth());
        assert!(!err.is_transient());
    }
}
