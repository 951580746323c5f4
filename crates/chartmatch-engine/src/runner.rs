//! The batch matching protocol.
//!
//! For each chart entry, in rank order: build the structured query,
//! search, fall back to the plain query when nothing comes back, then
//! run the selector over the candidates. A single entry's failure is
//! captured into its `MatchResult` and never aborts the batch; only an
//! outright credential rejection does, since no entry could succeed.
//!
//! Searches are paced with a short cancellable pause between entries
//! and a longer one between fixed-size batches. These are throttles
//! for the catalog's rate limits, not correctness mechanisms.

use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use chartmatch_catalog::{CatalogError, SearchProvider};
use chartmatch_core::model::{BatchSummary, Candidate, ChartEntry};
use chartmatch_core::query::{QueryForm, SearchQuery};
use chartmatch_core::select::MatchScorer;
use chartmatch_core::MatchResult;

use crate::error::{EngineError, EngineResult};

/// Pacing and retry knobs for a matching pass.
#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// Candidates requested per search.
    pub search_limit: u32,
    /// Entries per pacing batch.
    pub batch_size: usize,
    /// Pause between individual searches.
    pub entry_pause: Duration,
    /// Longer pause between batches.
    pub batch_pause: Duration,
    /// Retry attempts for transient search failures.
    pub max_retries: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            search_limit: 5,
            batch_size: 10,
            entry_pause: Duration::from_millis(250),
            batch_pause: Duration::from_secs(2),
            max_retries: 2,
        }
    }
}

/// The outcome of one matching pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<MatchResult>,
    pub summary: BatchSummary,
    /// Set when the pass was cancelled; `results` holds the entries
    /// completed before the abort, which remain valid.
    pub cancelled: bool,
}

/// Runs the matching protocol over a ranked chart.
///
/// Generic over the search capability so tests and alternative
/// transports can stand in for the REST client.
#[derive(Debug)]
pub struct MatchRunner<P> {
    provider: P,
    scorer: MatchScorer,
    options: MatchOptions,
    cancel: Option<watch::Receiver<bool>>,
}

impl<P: SearchProvider> MatchRunner<P> {
    #[must_use]
    pub fn new(provider: P, scorer: MatchScorer, options: MatchOptions) -> Self {
        Self {
            provider,
            scorer,
            options,
            cancel: None,
        }
    }

    /// Attach a cancellation signal. Send `true` on the paired sender to
    /// stop scheduling further entries; already-recorded results are
    /// kept and returned.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// The underlying search provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Run one matching pass over `entries`.
    ///
    /// Entries are validated up front: a malformed entry (missing title
    /// or artist) fails the whole pass before any search is issued.
    ///
    /// # Errors
    /// [`EngineError::Chart`] for a malformed entry or duplicate rank;
    /// [`EngineError::Unauthenticated`] when the catalog rejects the
    /// credential, which no entry could survive.
    pub async fn run(&self, entries: &[ChartEntry]) -> EngineResult<BatchReport> {
        for entry in entries {
            entry.validate()?;
        }
        chartmatch_core::model::entry::check_ranks(entries)?;

        tracing::info!(entries = entries.len(), "starting matching pass");

        let mut results = Vec::with_capacity(entries.len());
        let mut cancelled = false;

        for (position, entry) in entries.iter().enumerate() {
            if self.is_cancelled() {
                cancelled = true;
                break;
            }

            if position > 0 {
                let pause = if position % self.options.batch_size.max(1) == 0 {
                    self.options.batch_pause
                } else {
                    self.options.entry_pause
                };
                if self.pause(pause).await {
                    cancelled = true;
                    break;
                }
            }

            results.push(self.match_entry(entry).await?);
        }

        let summary = BatchSummary::from_results(&results);
        tracing::info!(
            matched = summary.matched,
            unmatched = summary.unmatched,
            cancelled,
            "matching pass finished"
        );
        for (title, artist) in &summary.unmatched_entries {
            tracing::info!(%title, %artist, "no match found");
        }

        Ok(BatchReport {
            results,
            summary,
            cancelled,
        })
    }

    /// Match a single entry: structured query, fallback on empty, select.
    async fn match_entry(&self, entry: &ChartEntry) -> EngineResult<MatchResult> {
        let query = SearchQuery::build(&entry.title, &entry.artist);

        let (form, outcome) = match self.search_with_retry(&query.structured).await {
            Ok(candidates) if candidates.is_empty() => {
                tracing::debug!(rank = entry.rank, "structured query empty, trying fallback");
                (
                    QueryForm::Fallback,
                    self.search_with_retry(&query.fallback).await,
                )
            }
            other => (QueryForm::Structured, other),
        };
        let query_used = query.for_form(form).to_string();

        let result = match outcome {
            Ok(candidates) if candidates.is_empty() => {
                MatchResult::unmatched(entry.clone(), query_used)
            }
            Ok(candidates) => {
                let selected = self
                    .scorer
                    .select_best(&candidates, &entry.title, &entry.artist);
                MatchResult::matched(entry.clone(), query_used, candidates, selected)
            }
            Err(err) if err.is_auth() => return Err(EngineError::Unauthenticated(err)),
            Err(err) => {
                tracing::warn!(rank = entry.rank, error = %err, "search failed for entry");
                MatchResult::failed(entry.clone(), query_used, err.to_string())
            }
        };

        Ok(result)
    }

    /// Re-run the search for one entry at a higher limit.
    ///
    /// Returns the query used and the fresh candidate list without
    /// auto-selecting -- the caller (or its UI) chooses, or may apply
    /// [`MatchScorer::select_best`] itself. Any previously selected
    /// index is invalid against the new list.
    ///
    /// # Errors
    /// Propagates the underlying search failure.
    pub async fn fetch_more(
        &self,
        entry: &ChartEntry,
        limit: u32,
    ) -> Result<(String, Vec<Candidate>), CatalogError> {
        let query = SearchQuery::build(&entry.title, &entry.artist);

        let candidates = self.search(&query.structured, limit).await?;
        if !candidates.is_empty() {
            return Ok((query.structured, candidates));
        }

        let candidates = self.search(&query.fallback, limit).await?;
        Ok((query.fallback, candidates))
    }

    async fn search(&self, query: &str, limit: u32) -> Result<Vec<Candidate>, CatalogError> {
        self.provider.search(query, limit).await
    }

    /// Search with bounded exponential backoff on transient failures.
    async fn search_with_retry(&self, query: &str) -> Result<Vec<Candidate>, CatalogError> {
        let limit = self.options.search_limit;
        (|| self.provider.search(query, limit))
            .retry(
                ExponentialBuilder::default()
                    .with_max_times(self.options.max_retries)
                    .with_jitter(),
            )
            .when(CatalogError::is_transient)
            .notify(|err, after| {
                tracing::warn!(error = %err, ?after, "transient search failure, retrying");
            })
            .await
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Sleep for `duration`, waking early on cancellation. Returns
    /// `true` when the pass was cancelled during the pause.
    async fn pause(&self, duration: Duration) -> bool {
        let Some(mut rx) = self.cancel.clone() else {
            tokio::time::sleep(duration).await;
            return false;
        };

        let start = tokio::time::Instant::now();
        tokio::select! {
            () = tokio::time::sleep(duration) => {}
            res = rx.changed() => {
                if res.is_err() {
                    // Sender gone; no cancellation can arrive anymore.
                    // Finish out the remainder of the pause.
                    tokio::time::sleep(duration.saturating_sub(start.elapsed())).await;
                }
            }
        }

        let cancelled = *rx.borrow();
        cancelled
    }
}
