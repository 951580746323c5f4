//! Catalog credentials.
//!
//! An [`AccessToken`] is an immutable value: every search call borrows
//! the token it was handed, and refresh produces a *new* token rather
//! than mutating one in place. Concurrent searches can therefore share
//! a token freely with no synchronization.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::error::{CatalogError, CatalogResult};

/// Refresh this many seconds before nominal expiry, so a token handed
/// to a long batch does not expire mid-pass.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// An immutable bearer credential for the catalog API.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    secret: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    #[must_use]
    pub fn new(secret: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            secret: secret.into(),
            expires_at,
        }
    }

    /// A token that never expires, for statically configured credentials.
    #[must_use]
    pub fn static_token(secret: impl Into<String>) -> Self {
        Self::new(secret, DateTime::<Utc>::MAX_UTC)
    }

    /// The bearer secret, for the `Authorization` header.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Whether the token is expired (or will be within the safety
    /// margin) at the given instant.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) >= self.expires_at
    }
}

// The secret never appears in logs.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Fetch a fresh token via the client-credentials grant.
///
/// Returns a new [`AccessToken`]; the caller swaps it in for subsequent
/// searches. Never mutates an existing token.
///
/// # Errors
/// Returns [`CatalogError::Auth`] when the token endpoint rejects the
/// client credentials, and transport/parse errors otherwise.
pub async fn fetch_token(
    http: &Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> CatalogResult<AccessToken> {
    let response = http
        .post(token_url)
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ])
        .send()
        .await?;

    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(CatalogError::Auth {
            message: format!("token endpoint returned {status}"),
        });
    }
    if !status.is_success() {
        return Err(CatalogError::Http {
            status: status.as_u16(),
            message: "token request failed".to_string(),
        });
    }

    let token: TokenResponse = response.json().await.map_err(|e| CatalogError::Parse {
        message: e.to_string(),
    })?;

    tracing::debug!(expires_in = token.expires_in, "obtained catalog token");

    Ok(AccessToken::new(
        token.access_token,
        Utc::now() + Duration::seconds(token.expires_in),
    ))
}
