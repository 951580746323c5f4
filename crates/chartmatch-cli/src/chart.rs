//! Chart file loading.
//!
//! The chart source at this boundary is a JSON array of
//! `{rank, title, artist}` objects (what a scraper or export step
//! produces). Entries are normalized on load, sorted by rank, and
//! checked for rank uniqueness; rank gaps are reported but tolerated.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use chartmatch_core::model::entry::check_ranks;
use chartmatch_core::model::{ChartEntry, ChartSource};

#[derive(Debug, Deserialize)]
struct RawEntry {
    rank: u32,
    title: String,
    artist: String,
}

/// A ranked chart loaded from a JSON file.
#[derive(Debug)]
pub struct ChartFile {
    entries: Vec<ChartEntry>,
}

impl ChartFile {
    /// Load and normalize a chart file.
    ///
    /// # Errors
    /// Fails on unreadable or malformed JSON, and on duplicate ranks.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read chart file {}", path.display()))?;

        let raw: Vec<RawEntry> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse chart file {}", path.display()))?;

        let mut entries: Vec<ChartEntry> = raw
            .into_iter()
            .map(|e| ChartEntry::new(e.rank, e.title, e.artist))
            .collect();
        entries.sort_by_key(|e| e.rank);

        let gaps = check_ranks(&entries)
            .with_context(|| format!("Invalid chart in {}", path.display()))?;
        if !gaps.is_empty() {
            tracing::warn!(
                chart = %path.display(),
                gaps = gaps.len(),
                "chart ranks are not contiguous"
            );
        }

        tracing::info!(
            chart = %path.display(),
            entries = entries.len(),
            "loaded chart"
        );

        Ok(Self { entries })
    }
}

impl ChartSource for ChartFile {
    fn entries(&self) -> chartmatch_core::Result<Vec<ChartEntry>> {
        Ok(self.entries.clone())
    }
}
