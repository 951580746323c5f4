//! Catalog API client.
//!
//! Wraps a [`reqwest::Client`] pre-configured with a user-agent and a
//! 30-second timeout. The client holds an immutable [`AccessToken`];
//! swapping in a refreshed credential means constructing a new client
//! value (cheap -- the underlying connection pool is shared via
//! `reqwest::Client`'s internal `Arc`).

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use chartmatch_core::model::{AlbumType, Candidate};

use crate::auth::AccessToken;
use crate::error::{CatalogError, CatalogResult};
use crate::rate_limit::RateLimiter;

const USER_AGENT: &str = "chartmatch/0.1.0 (https://github.com/oxur/chartmatch)";

// ---------------------------------------------------------------------------
// Response types (private -- the catalog nests JSON two levels deep)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: TrackPage,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<WireTrack>,
}

#[derive(Debug, Deserialize)]
struct WireTrack {
    id: String,
    name: String,
    #[serde(default)]
    artists: Vec<WireArtist>,
    album: WireAlbum,
    #[serde(default)]
    explicit: bool,
    #[serde(default)]
    popularity: u8,
    #[serde(default)]
    duration_ms: u64,
    preview_url: Option<String>,
    external_urls: Option<WireExternalUrls>,
}

#[derive(Debug, Deserialize)]
struct WireArtist {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WireAlbum {
    name: String,
    #[serde(default)]
    album_type: Option<String>,
    release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireExternalUrls {
    spotify: Option<String>,
}

impl From<WireTrack> for Candidate {
    fn from(track: WireTrack) -> Self {
        let all_artists: Vec<String> = track.artists.into_iter().map(|a| a.name).collect();
        let artist = all_artists.first().cloned().unwrap_or_default();

        Self {
            id: track.id,
            name: track.name,
            artist,
            all_artists,
            album_name: track.album.name,
            album_type: track
                .album
                .album_type
                .as_deref()
                .map_or(AlbumType::Other, AlbumType::parse),
            release_date: track.album.release_date,
            explicit: track.explicit,
            popularity: track.popularity,
            duration_ms: track.duration_ms,
            preview_url: track.preview_url,
            external_url: track.external_urls.and_then(|u| u.spotify),
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// REST catalog client implementing the search capability.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
    token: AccessToken,
    rate_limiter: RateLimiter,
}

impl CatalogClient {
    /// Create a new catalog client for the given API base URL and
    /// credential.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>, token: AccessToken) -> CatalogResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            rate_limiter: RateLimiter::per_second(4),
        })
    }

    /// A copy of this client carrying a refreshed credential.
    #[must_use]
    pub fn with_token(&self, token: AccessToken) -> Self {
        Self {
            token,
            ..self.clone()
        }
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn bearer(&self) -> &str {
        self.token.secret()
    }

    /// Map a non-success response status to the error taxonomy.
    pub(crate) fn status_error(response: &reqwest::Response) -> Option<CatalogError> {
        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Some(CatalogError::Auth {
                message: format!("catalog returned {status}"),
            }),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after_secs = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok());
                Some(CatalogError::RateLimited { retry_after_secs })
            }
            s if !s.is_success() => Some(CatalogError::Http {
                status: s.as_u16(),
                message: "catalog request failed".to_string(),
            }),
            _ => None,
        }
    }

    /// Search the catalog for tracks matching `query`.
    ///
    /// Returns candidates in the catalog's result order, which the
    /// selector preserves for tie-breaking and display.
    ///
    /// # Errors
    /// Returns the mapped [`CatalogError`] on transport, auth, or parse
    /// failure.
    pub async fn search(&self, query: &str, limit: u32) -> CatalogResult<Vec<Candidate>> {
        self.rate_limiter.acquire().await;

        tracing::debug!(%query, limit, "catalog search");

        let limit = limit.to_string();
        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .bearer_auth(self.token.secret())
            .query(&[
                ("q", query),
                ("type", "track"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        if let Some(err) = Self::status_error(&response) {
            return Err(err);
        }

        let result: SearchResponse = response.json().await.map_err(|e| CatalogError::Parse {
            message: e.to_string(),
        })?;

        Ok(result.tracks.items.into_iter().map(Candidate::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = CatalogClient::new("https://api.example.com/v1/", AccessToken::static_token("t"));
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url(), "https://api.example.com/v1");
    }

    #[test]
    fn test_wire_track_conversion() {
        let json = r#"{
            "id": "4uLU6hMCjMI75M1A2tKUQC",
            "name": "Somebody That I Used to Know",
            "artists": [{"name": "Gotye"}, {"name": "Kimbra"}],
            "album": {
                "name": "Making Mirrors",
                "album_type": "album",
                "release_date": "2011-07-05"
            },
            "explicit": false,
            "popularity": 70,
            "duration_ms": 244884,
            "preview_url": null,
            "external_urls": {"spotify": "https://open.example.com/track/4uLU"}
        }"#;

        let track: WireTrack = serde_json::from_str(json).unwrap();
        let candidate = Candidate::from(track);

        assert_eq!(candidate.artist, "Gotye");
        assert_eq!(
            candidate.all_artists,
            vec!["Gotye".to_string(), "Kimbra".to_string()]
        );
        assert_eq!(candidate.album_type, AlbumType::Album);
        assert_eq!(candidate.popularity, 70);
        assert_eq!(
            candidate.external_url.as_deref(),
            Some("https://open.example.com/track/4uLU")
        );
    }

    #[test]
    fn test_wire_track_without_artists() {
        let json = r#"{
            "id": "x",
            "name": "Unknown",
            "album": {"name": "Unknown"}
        }"#;

        let track: WireTrack = serde_json::from_str(json).unwrap();
        let candidate = Candidate::from(track);
        assert_eq!(candidate.artist, "");
        assert_eq!(candidate.album_type, AlbumType::Other);
        assert_eq!(candidate.release_date, None);
    }
}
