use serde::{Deserialize, Serialize};

use crate::model::{Candidate, ChartEntry};

/// The outcome of matching one chart entry.
///
/// Created once per entry per matching pass. A "fetch more candidates"
/// request replaces the candidate list and invalidates any previously
/// selected index, so a fresh `MatchResult` is built in that case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub entry: ChartEntry,

    /// The query string that produced `candidates` (structured or
    /// fallback form, whichever ran last).
    pub query_used: String,

    /// Candidates in search-result order, preserved for display.
    pub candidates: Vec<Candidate>,

    /// Index into `candidates` of the selected best match. `None` when
    /// nothing was returned or the search itself failed.
    pub selected: Option<usize>,

    /// Set when the search capability failed for this entry.
    pub error: Option<String>,
}

impl MatchResult {
    /// Build a result for a successful search with a selected candidate.
    ///
    /// The selected index must point into `candidates`.
    #[must_use]
    pub fn matched(
        entry: ChartEntry,
        query_used: String,
        candidates: Vec<Candidate>,
        selected: usize,
    ) -> Self {
        debug_assert!(selected < candidates.len());
        Self {
            entry,
            query_used,
            candidates,
            selected: Some(selected),
            error: None,
        }
    }

    /// Build a result for a search that returned nothing, even after the
    /// fallback query. Not an error state.
    #[must_use]
    pub fn unmatched(entry: ChartEntry, query_used: String) -> Self {
        Self {
            entry,
            query_used,
            candidates: Vec::new(),
            selected: None,
            error: None,
        }
    }

    /// Build a result for a failed search call.
    #[must_use]
    pub fn failed(entry: ChartEntry, query_used: String, error: String) -> Self {
        Self {
            entry,
            query_used,
            candidates: Vec::new(),
            selected: None,
            error: Some(error),
        }
    }

    #[must_use]
    pub fn has_match(&self) -> bool {
        self.selected.is_some()
    }

    /// The catalog identifier of the selected candidate, if any.
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.candidates.get(i))
            .map(|c| c.id.as_str())
    }
}

/// Informational summary of one matching pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub matched: usize,
    pub unmatched: usize,

    /// (title, artist) pairs that found no acceptable candidate.
    pub unmatched_entries: Vec<(String, String)>,
}

impl BatchSummary {
    /// Tally a pass's results.
    #[must_use]
    pub fn from_results(results: &[MatchResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            if result.has_match() {
                summary.matched += 1;
            } else {
                summary.unmatched += 1;
                summary
                    .unmatched_entries
                    .push((result.entry.title.clone(), result.entry.artist.clone()));
            }
        }
        summary
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.matched + self.unmatched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AlbumType;

    fn candidate(id: &str) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: "Song".to_string(),
            artist: "Band".to_string(),
            all_artists: vec!["Band".to_string()],
            album_name: "Album".to_string(),
            album_type: AlbumType::Single,
            release_date: None,
            explicit: false,
            popularity: 10,
            duration_ms: 180_000,
            preview_url: None,
            external_url: None,
        }
    }

    #[test]
    fn test_matched_result() {
        let result = MatchResult::matched(
            ChartEntry::new(1, "Song", "Band"),
            "track:\"Song\" artist:\"Band\"".to_string(),
            vec![candidate("a"), candidate("b")],
            1,
        );
        assert!(result.has_match());
        assert_eq!(result.selected_id(), Some("b"));
        assert!(result.error.is_none());
    }

    #[test]
    fn test_unmatched_is_not_an_error() {
        let result = MatchResult::unmatched(ChartEntry::new(1, "Song", "Band"), "Song Band".into());
        assert!(!result.has_match());
        assert!(result.error.is_none());
        assert_eq!(result.selected_id(), None);
    }

    #[test]
    fn test_summary_counts() {
        let results = vec![
            MatchResult::matched(
                ChartEntry::new(1, "A", "X"),
                "q".into(),
                vec![candidate("a")],
                0,
            ),
            MatchResult::unmatched(ChartEntry::new(2, "B", "Y"), "q".into()),
            MatchResult::failed(ChartEntry::new(3, "C", "Z"), "q".into(), "boom".into()),
        ];
        let summary = BatchSummary::from_results(&results);
        assert_eq!(summary.matched, 1);
        assert_eq!(summary.unmatched, 2);
        assert_eq!(summary.total(), 3);
        assert_eq!(
            summary.unmatched_entries,
            vec![
                ("B".to_string(), "Y".to_string()),
                ("C".to_string(), "Z".to_string())
            ]
        );
    }
}
