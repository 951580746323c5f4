use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for chartmatch.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (CM_* prefix)
/// 3. Config file (~/.config/chartmatch/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the catalog API.
    #[serde(default = "default_catalog_base_url")]
    pub catalog_base_url: String,

    /// Token endpoint for the client-credentials grant.
    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// Catalog application client id (paired with `client_secret`).
    pub client_id: Option<String>,

    /// Catalog application client secret.
    pub client_secret: Option<String>,

    /// Statically configured bearer token. When set, the client
    /// credentials are ignored and no token refresh happens.
    pub access_token: Option<String>,

    /// Catalog user that owns created playlists.
    pub user_id: Option<String>,

    /// Candidates requested per search. More alternatives improve
    /// selection quality.
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,

    /// Entries per pacing batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Pause between individual searches, in milliseconds.
    #[serde(default = "default_entry_pause_ms")]
    pub entry_pause_ms: u64,

    /// Longer pause between batches, in milliseconds.
    #[serde(default = "default_batch_pause_ms")]
    pub batch_pause_ms: u64,

    /// Where the per-entry match report is written.
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_base_url: default_catalog_base_url(),
            token_url: default_token_url(),
            client_id: None,
            client_secret: None,
            access_token: None,
            user_id: None,
            search_limit: default_search_limit(),
            batch_size: default_batch_size(),
            entry_pause_ms: default_entry_pause_ms(),
            batch_pause_ms: default_batch_pause_ms(),
            report_path: default_report_path(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/chartmatch/config.toml
    /// Reads environment variables with CM_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific file path (plus environment
    /// variables). A missing file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("cm");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// Whether any credential material is configured at all.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.access_token.is_some() || (self.client_id.is_some() && self.client_secret.is_some())
    }

    /// Pacing options for the match runner, derived from this config.
    #[must_use]
    pub fn match_options(&self) -> crate::runner::MatchOptions {
        crate::runner::MatchOptions {
            search_limit: self.search_limit,
            batch_size: self.batch_size.max(1),
            entry_pause: std::time::Duration::from_millis(self.entry_pause_ms),
            batch_pause: std::time::Duration::from_millis(self.batch_pause_ms),
            ..crate::runner::MatchOptions::default()
        }
    }
}

fn default_catalog_base_url() -> String {
    "https://api.spotify.com/v1".to_string()
}

fn default_token_url() -> String {
    "https://accounts.spotify.com/api/token".to_string()
}

fn default_search_limit() -> u32 {
    5
}

fn default_batch_size() -> usize {
    10
}

fn default_entry_pause_ms() -> u64 {
    250
}

fn default_batch_pause_ms() -> u64 {
    2000
}

/// Default report output path: ./chartmatch-report.json
fn default_report_path() -> PathBuf {
    PathBuf::from("chartmatch-report.json")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/chartmatch/config.toml
/// - macOS: ~/Library/Application Support/chartmatch/config.toml
/// - Windows: %APPDATA%\chartmatch\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("chartmatch")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Chartmatch Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (CM_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Catalog API endpoints
#catalog_base_url = "https://api.spotify.com/v1"
#token_url = "https://accounts.spotify.com/api/token"

# Application credentials for the client-credentials grant.
# Register an application with the catalog provider to obtain these.
#
# Can also be set via:
# - Environment: CM_CLIENT_ID / CM_CLIENT_SECRET
client_id = "your-client-id-here"
client_secret = "your-client-secret-here"

# Alternatively, a pre-obtained bearer token (skips the token grant):
#access_token = "..."

# Catalog user that owns created playlists
#user_id = "your-user-id"

# Candidates requested per search; more alternatives improve selection
#search_limit = 5

# Rate pacing: entries per batch, and pauses (milliseconds)
#batch_size = 10
#entry_pause_ms = 250
#batch_pause_ms = 2000

# Where the per-entry match report is written
#report_path = "chartmatch-report.json"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.search_limit, 5);
        assert_eq!(config.batch_size, 10);
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_has_credentials() {
        let mut config = Config::default();
        config.client_id = Some("id".to_string());
        assert!(!config.has_credentials());
        config.client_secret = Some("secret".to_string());
        assert!(config.has_credentials());

        let mut config = Config::default();
        config.access_token = Some("token".to_string());
        assert!(config.has_credentials());
    }

    #[test]
    fn test_config_load() {
        // Should not fail even if config file doesn't exist
        let result = Config::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
catalog_base_url = "https://catalog.test/v1"
client_id = "test-client"
client_secret = "test-secret"
user_id = "tester"
search_limit = 9
batch_size = 3
entry_pause_ms = 10
batch_pause_ms = 50
report_path = "out/report.json"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.catalog_base_url, "https://catalog.test/v1");
        assert_eq!(config.client_id.as_deref(), Some("test-client"));
        assert_eq!(config.client_secret.as_deref(), Some("test-secret"));
        assert_eq!(config.user_id.as_deref(), Some("tester"));
        assert_eq!(config.search_limit, 9);
        assert_eq!(config.batch_size, 3);
        assert_eq!(config.entry_pause_ms, 10);
        assert_eq!(config.batch_pause_ms, 50);
        assert_eq!(config.report_path, PathBuf::from("out/report.json"));
        assert!(config.has_credentials());
        // Token endpoint falls back to the default when not in the file.
        assert_eq!(config.token_url, default_token_url());
    }

    #[test]
    fn test_config_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.search_limit, default_search_limit());
        assert!(!config.has_credentials());
    }
}
