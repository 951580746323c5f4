use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One ranked (title, artist) pair from an external chart.
///
/// Title and artist are upper-cased on construction; the chart sources
/// this tool consumes mix casing freely, and matching as well as display
/// work on the normalized form. Entries are immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartEntry {
    /// Position on the chart. Positive and unique; gaps are tolerated.
    pub rank: u32,
    pub title: String,
    pub artist: String,
}

impl ChartEntry {
    #[must_use]
    pub fn new(rank: u32, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            rank,
            title: title.into().trim().to_uppercase(),
            artist: artist.into().trim().to_uppercase(),
        }
    }

    /// Check the precondition for matching: a positive rank and non-empty
    /// title and artist. Entries failing this are rejected before any
    /// search is issued.
    pub fn validate(&self) -> Result<()> {
        if self.rank == 0 {
            return Err(Error::MalformedEntry {
                rank: self.rank,
                reason: "rank must be positive",
            });
        }
        if self.title.trim().is_empty() {
            return Err(Error::MalformedEntry {
                rank: self.rank,
                reason: "missing title",
            });
        }
        if self.artist.trim().is_empty() {
            return Err(Error::MalformedEntry {
                rank: self.rank,
                reason: "missing artist",
            });
        }
        Ok(())
    }
}

/// A source of rank-sorted chart entries, consumed once per matching pass.
pub trait ChartSource {
    /// Return the entries of the current chart, already sorted by rank
    /// with ranks unique. Rank gaps are reported by implementations but
    /// are not fatal.
    fn entries(&self) -> Result<Vec<ChartEntry>>;
}

/// Verify rank uniqueness and report (but tolerate) gaps in the sequence.
///
/// Works on entries in any order: ranks are sorted internally before
/// checking. Returns the ranks at which a gap begins, for reporting.
/// A duplicate rank is an error since rank is the ordering key.
pub fn check_ranks(entries: &[ChartEntry]) -> Result<Vec<u32>> {
    let mut ranks: Vec<u32> = entries.iter().map(|e| e.rank).collect();
    ranks.sort_unstable();

    let mut gaps = Vec::new();
    for pair in ranks.windows(2) {
        if pair[1] == pair[0] {
            return Err(Error::DuplicateRank(pair[0]));
        }
        if pair[1] > pair[0] + 1 {
            gaps.push(pair[0]);
        }
    }

    if !gaps.is_empty() {
        tracing::warn!("chart has rank gaps after positions {:?}", gaps);
    }

    Ok(gaps)
}
