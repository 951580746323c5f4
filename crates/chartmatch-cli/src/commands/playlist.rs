//! The `playlist` command: commit matched identifiers to the catalog.

use std::path::PathBuf;

use anyhow::{Context, Result};

use chartmatch_catalog::CatalogClient;
use chartmatch_engine::{BatchReport, Config};

use super::run;

/// Build (or replace) a playlist from the matched entries of a report.
pub async fn build_playlist(
    report_path: PathBuf,
    name: String,
    replace: Option<String>,
) -> Result<()> {
    let config = Config::load()?;

    let contents = std::fs::read_to_string(&report_path)
        .with_context(|| format!("Failed to read report {}", report_path.display()))?;
    let report: BatchReport =
        serde_json::from_str(&contents).context("Failed to parse match report")?;

    // Rank order is preserved: results were recorded in chart order.
    let track_ids: Vec<String> = report
        .results
        .iter()
        .filter_map(|r| r.selected_id())
        .map(String::from)
        .collect();

    if track_ids.is_empty() {
        anyhow::bail!("Report contains no matched entries; nothing to add");
    }

    let token = run::credential(&config).await?;
    let client = CatalogClient::new(&config.catalog_base_url, token)?;

    let playlist_id = match replace {
        Some(id) => {
            client.replace_tracks(&id, &track_ids).await?;
            id
        }
        None => {
            let user_id = config
                .user_id
                .as_deref()
                .context("No user_id configured; required to create a playlist")?;
            let description = format!(
                "{} matched chart entries ({} unmatched)",
                report.summary.matched, report.summary.unmatched
            );
            let playlist_id = client.create_playlist(user_id, &name, &description).await?;
            client.add_tracks(&playlist_id, &track_ids).await?;
            playlist_id
        }
    };

    println!("Playlist {playlist_id}: {} tracks", track_ids.len());
    Ok(())
}
