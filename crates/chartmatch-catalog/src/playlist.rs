//! Playlist operations against the catalog API.
//!
//! Mechanical CRUD calls consuming the identifiers the match engine
//! selected. The add endpoint caps request bodies at 100 track ids, so
//! larger batches are chunked.

use serde::{Deserialize, Serialize};

use crate::client::CatalogClient;
use crate::error::{CatalogError, CatalogResult};

/// Maximum track ids per add/replace request, per the catalog API.
const TRACKS_PER_REQUEST: usize = 100;

#[derive(Debug, Serialize)]
struct CreatePlaylistBody<'a> {
    name: &'a str,
    description: &'a str,
    public: bool,
}

#[derive(Debug, Deserialize)]
struct PlaylistResponse {
    id: String,
}

#[derive(Debug, Serialize)]
struct TrackUris {
    uris: Vec<String>,
}

/// Convert opaque track ids into the URI form the playlist endpoints take.
fn track_uris(track_ids: &[String]) -> Vec<String> {
    track_ids
        .iter()
        .map(|id| {
            if id.contains(':') {
                id.clone()
            } else {
                format!("spotify:track:{id}")
            }
        })
        .collect()
}

impl CatalogClient {
    /// Create a playlist for `user_id`, returning its catalog id.
    ///
    /// # Errors
    /// Returns the mapped [`CatalogError`] on transport, auth, or parse
    /// failure.
    pub async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
    ) -> CatalogResult<String> {
        let response = self
            .http()
            .post(format!("{}/users/{user_id}/playlists", self.base_url()))
            .bearer_auth(self.bearer())
            .json(&CreatePlaylistBody {
                name,
                description,
                public: true,
            })
            .send()
            .await?;

        if let Some(err) = Self::status_error(&response) {
            return Err(err);
        }

        let playlist: PlaylistResponse =
            response.json().await.map_err(|e| CatalogError::Parse {
                message: e.to_string(),
            })?;

        tracing::info!(playlist_id = %playlist.id, %name, "created playlist");
        Ok(playlist.id)
    }

    /// Append tracks to a playlist, chunking at the API's request cap.
    ///
    /// # Errors
    /// Returns the mapped [`CatalogError`]; a failing chunk aborts the
    /// remainder since later chunks would land out of order.
    pub async fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> CatalogResult<()> {
        for chunk in track_uris(track_ids).chunks(TRACKS_PER_REQUEST) {
            let response = self
                .http()
                .post(format!("{}/playlists/{playlist_id}/tracks", self.base_url()))
                .bearer_auth(self.bearer())
                .json(&TrackUris {
                    uris: chunk.to_vec(),
                })
                .send()
                .await?;

            if let Some(err) = Self::status_error(&response) {
                return Err(err);
            }
        }

        tracing::info!(playlist_id, count = track_ids.len(), "added tracks");
        Ok(())
    }

    /// Replace a playlist's contents; an empty slice clears it.
    ///
    /// # Errors
    /// Returns the mapped [`CatalogError`] on failure.
    pub async fn replace_tracks(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> CatalogResult<()> {
        let uris = track_uris(track_ids);
        let (head, rest) = uris.split_at(TRACKS_PER_REQUEST.min(uris.len()));

        let response = self
            .http()
            .put(format!("{}/playlists/{playlist_id}/tracks", self.base_url()))
            .bearer_auth(self.bearer())
            .json(&TrackUris {
                uris: head.to_vec(),
            })
            .send()
            .await?;

        if let Some(err) = Self::status_error(&response) {
            return Err(err);
        }

        // Anything beyond the first request-sized chunk is appended.
        for chunk in rest.chunks(TRACKS_PER_REQUEST) {
            let response = self
                .http()
                .post(format!("{}/playlists/{playlist_id}/tracks", self.base_url()))
                .bearer_auth(self.bearer())
                .json(&TrackUris {
                    uris: chunk.to_vec(),
                })
                .send()
                .await?;

            if let Some(err) = Self::status_error(&response) {
                return Err(err);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_uris_from_bare_ids() {
        let uris = track_uris(&["abc123".to_string()]);
        assert_eq!(uris, vec!["spotify:track:abc123".to_string()]);
    }

    #[test]
    fn test_track_uris_pass_through() {
        let uris = track_uris(&["spotify:track:abc123".to_string()]);
        assert_eq!(uris, vec!["spotify:track:abc123".to_string()]);
    }
}
