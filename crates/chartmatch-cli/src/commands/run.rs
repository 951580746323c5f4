//! The `run` command: one matching pass over a chart file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};

use chartmatch_catalog::{auth, AccessToken, CatalogClient};
use chartmatch_core::model::ChartSource;
use chartmatch_core::select::MatchScorer;
use chartmatch_engine::{BatchReport, Config, MatchRunner};

use crate::chart::ChartFile;

/// Build the catalog credential from configuration: a static token when
/// one is configured, otherwise a fresh client-credentials token.
pub(crate) async fn credential(config: &Config) -> Result<AccessToken> {
    if let Some(token) = &config.access_token {
        return Ok(AccessToken::static_token(token.clone()));
    }

    let (client_id, client_secret) = config
        .client_id
        .as_deref()
        .zip(config.client_secret.as_deref())
        .context(
            "No catalog credentials configured; set access_token or \
             client_id/client_secret (see `chartmatch config init`)",
        )?;

    let http = reqwest::Client::new();
    let token = auth::fetch_token(&http, &config.token_url, client_id, client_secret)
        .await
        .context("Failed to obtain catalog token")?;
    Ok(token)
}

pub async fn run_match(
    chart_path: PathBuf,
    limit: Option<u32>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(limit) = limit {
        config.search_limit = limit;
    }
    if let Some(output) = output {
        config.report_path = output;
    }

    let chart = ChartFile::load(&chart_path)?;
    let entries = chart.entries()?;

    let token = credential(&config).await?;
    let client = CatalogClient::new(&config.catalog_base_url, token)?;

    // Ctrl-C stops scheduling further entries; completed results are kept.
    let (cancel_tx, cancel_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, finishing current entry");
            if cancel_tx.send(true).is_err() {
                tracing::debug!("run already finished, nothing to cancel");
            }
        }
    });

    let scorer = MatchScorer::new(Utc::now().year());
    let runner = MatchRunner::new(client, scorer, config.match_options())
        .with_cancellation(cancel_rx);

    let report = runner.run(&entries).await?;

    print_report(&report);
    write_report(&report, &config.report_path)?;

    Ok(())
}

fn print_report(report: &BatchReport) {
    println!();
    for result in &report.results {
        let entry = &result.entry;
        match result.selected.and_then(|i| result.candidates.get(i)) {
            Some(candidate) => println!(
                "  #{:<3} {} - {}  ->  {} - {} [{}]",
                entry.rank, entry.title, entry.artist, candidate.name, candidate.artist, candidate.id
            ),
            None => {
                let reason = result.error.as_deref().unwrap_or("no results");
                println!(
                    "  #{:<3} {} - {}  ->  NO MATCH ({reason})",
                    entry.rank, entry.title, entry.artist
                );
            }
        }
    }

    let summary = &report.summary;
    println!();
    println!(
        "Matched {} of {} entries{}",
        summary.matched,
        summary.total(),
        if report.cancelled { " (cancelled)" } else { "" }
    );
    if !summary.unmatched_entries.is_empty() {
        println!("Unmatched:");
        for (title, artist) in &summary.unmatched_entries {
            println!("  {title} - {artist}");
        }
    }
}

fn write_report(report: &BatchReport, path: &std::path::Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    println!("Report written to {}", path.display());
    Ok(())
}
