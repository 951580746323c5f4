//! Weighted match selection.
//!
//! Given a chart entry's title/artist and the raw candidates a catalog
//! search returned, score every candidate with a fixed weighted
//! heuristic and pick the best by index. Scoring is a pure function of
//! the inputs plus an explicit current year, so selection is fully
//! deterministic and unit-testable.
//!
//! ## Scoring terms
//! ```text
//! score = popularity                      (0-100, as-is)
//!       + title_similarity  * 20          (0-20)
//!       + artist_similarity * 15          (0-15)
//!       + album-type bonus                (album +10, single +5)
//!       + clean-version bonus             (+5 when not explicit)
//!       + recency bonus                   (+3 when released in last 10 years)
//!       + keyword penalties               (cover/karaoke -30, remix/dance -20)
//! ```
//! Both penalty groups can fire on one candidate, compounding to -50.

use crate::model::{AlbumType, Candidate};
use crate::similarity::similarity;

const TITLE_WEIGHT: f64 = 20.0;
const ARTIST_WEIGHT: f64 = 15.0;
const ALBUM_BONUS: f64 = 10.0;
const SINGLE_BONUS: f64 = 5.0;
const CLEAN_BONUS: f64 = 5.0;
const RECENCY_BONUS: f64 = 3.0;
const RECENCY_WINDOW_YEARS: i32 = 10;

/// Where a penalty group's keywords are looked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PenaltyScope {
    /// Track name only.
    Name,
    /// Track name or primary artist.
    NameOrArtist,
}

/// One keyword penalty group: any listed substring (case-insensitive)
/// appearing in scope applies the delta once.
#[derive(Debug)]
struct KeywordPenalty {
    terms: &'static [&'static str],
    scope: PenaltyScope,
    delta: f64,
}

/// Penalty table. Declarative so the keyword lists are testable apart
/// from the scoring arithmetic.
const KEYWORD_PENALTIES: &[KeywordPenalty] = &[
    // Cover bands and karaoke compilations shadow popular chart songs
    // under the original title.
    KeywordPenalty {
        terms: &["cover", "tribute", "karaoke", "instrumental"],
        scope: PenaltyScope::NameOrArtist,
        delta: -30.0,
    },
    // Club remixes and megamix compilations.
    KeywordPenalty {
        terms: &["party", "dance", "remix", "mix"],
        scope: PenaltyScope::Name,
        delta: -20.0,
    },
];

/// A candidate paired with its computed score. Selector-internal;
/// exists only for the duration of one selection call.
#[derive(Debug)]
struct ScoredCandidate {
    index: usize,
    score: f64,
}

/// Scores candidates against a chart entry and selects the best.
///
/// The current year is passed in explicitly rather than read from the
/// process clock, keeping the recency term deterministic under test.
#[derive(Debug, Clone, Copy)]
pub struct MatchScorer {
    current_year: i32,
}

impl MatchScorer {
    #[must_use]
    pub fn new(current_year: i32) -> Self {
        Self { current_year }
    }

    /// Score one candidate against the original title/artist.
    #[must_use]
    pub fn score(&self, title: &str, artist: &str, candidate: &Candidate) -> f64 {
        let mut score = f64::from(candidate.popularity);

        score += similarity(title, &candidate.name) * TITLE_WEIGHT;
        score += similarity(artist, &candidate.artist) * ARTIST_WEIGHT;

        score += match candidate.album_type {
            AlbumType::Album => ALBUM_BONUS,
            AlbumType::Single => SINGLE_BONUS,
            AlbumType::Compilation | AlbumType::Other => 0.0,
        };

        // Chart singles are presumed radio-edit-preferred.
        if !candidate.explicit {
            score += CLEAN_BONUS;
        }

        if let Some(year) = candidate.release_year() {
            if year >= self.current_year - RECENCY_WINDOW_YEARS {
                score += RECENCY_BONUS;
            }
        }

        score + keyword_penalty(candidate)
    }

    /// Pick the best candidate, returning an index into `candidates` in
    /// their original search order.
    ///
    /// Lists of zero or one element short-circuit to index 0 without
    /// scoring; an empty list's 0 is a sentinel the caller interprets as
    /// "no match". Ties go to the earlier search result. This function
    /// never fails -- absence of a *good* match is the caller's judgment.
    #[must_use]
    pub fn select_best(&self, candidates: &[Candidate], title: &str, artist: &str) -> usize {
        if candidates.len() <= 1 {
            return 0;
        }

        let mut best = ScoredCandidate {
            index: 0,
            score: f64::NEG_INFINITY,
        };

        for (index, candidate) in candidates.iter().enumerate() {
            let score = self.score(title, artist, candidate);
            tracing::trace!(
                index,
                score,
                name = %candidate.name,
                artist = %candidate.artist,
                "scored candidate"
            );
            if score > best.score {
                best = ScoredCandidate { index, score };
            }
        }

        best.index
    }
}

/// Sum of all keyword penalty groups that fire on a candidate.
fn keyword_penalty(candidate: &Candidate) -> f64 {
    let name = candidate.name.to_lowercase();
    let artist = candidate.artist.to_lowercase();

    KEYWORD_PENALTIES
        .iter()
        .filter(|penalty| {
            penalty.terms.iter().any(|term| match penalty.scope {
                PenaltyScope::Name => name.contains(term),
                PenaltyScope::NameOrArtist => name.contains(term) || artist.contains(term),
            })
        })
        .map(|penalty| penalty.delta)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, artist: &str) -> Candidate {
        Candidate {
            id: format!("id-{name}"),
            name: name.to_string(),
            artist: artist.to_string(),
            all_artists: vec![artist.to_string()],
            album_name: "Test Album".to_string(),
            album_type: AlbumType::Single,
            release_date: Some("2020-01-01".to_string()),
            explicit: false,
            popularity: 50,
            duration_ms: 210_000,
            preview_url: None,
            external_url: None,
        }
    }

    fn scorer() -> MatchScorer {
        MatchScorer::new(2026)
    }

    #[test]
    fn test_empty_list_returns_zero() {
        assert_eq!(scorer().select_best(&[], "Song", "Band"), 0);
    }

    #[test]
    fn test_single_candidate_returns_zero() {
        let candidates = vec![candidate("Anything", "Anyone")];
        assert_eq!(scorer().select_best(&candidates, "Song", "Band"), 0);
    }

    #[test]
    fn test_exact_match_beats_dissimilar() {
        // Identical except for name/artist: the exact match gains the
        // full 35 similarity points over a zero-similarity candidate.
        let exact = candidate("Royals", "Lorde");
        let other = candidate("zzzzzz", "qqqqq");

        let scorer = scorer();
        let exact_score = scorer.score("Royals", "Lorde", &exact);
        let other_score = scorer.score("Royals", "Lorde", &other);
        assert!(exact_score - other_score >= 35.0 - 1e-9);

        assert_eq!(scorer.select_best(&[other, exact], "Royals", "Lorde"), 1);
    }

    #[test]
    fn test_karaoke_penalty() {
        let original = candidate("Royals", "Lorde");
        let karaoke = candidate("Royals (Karaoke Version)", "Lorde");

        let scorer = scorer();
        let delta = scorer.score("Royals", "Lorde", &original)
            - scorer.score("Royals", "Lorde", &karaoke);
        assert!(delta >= 30.0);

        // A karaoke rendition with a sizable popularity edge still loses.
        let mut popular_karaoke = karaoke;
        popular_karaoke.popularity = 70;
        assert_eq!(
            scorer.select_best(&[popular_karaoke, original], "Royals", "Lorde"),
            1
        );
    }

    #[test]
    fn test_penalty_on_artist_field() {
        let tribute = candidate("Royals", "The Tribute Orchestra");
        let original = candidate("Royals", "Lorde");
        assert_eq!(
            scorer().select_best(&[tribute, original], "Royals", "Lorde"),
            1
        );
    }

    #[test]
    fn test_penalties_stack() {
        let both = candidate("Royals - Karaoke Dance Mix", "Lorde");
        let clean = candidate("Royals", "Lorde");
        let scorer = scorer();
        let delta =
            scorer.score("Royals", "Lorde", &clean) - scorer.score("Royals", "Lorde", &both);
        // -30 (karaoke) and -20 (mix) both fire.
        assert!(delta >= 50.0);
    }

    #[test]
    fn test_album_type_bonus_ordering() {
        let mut on_album = candidate("Song", "Band");
        on_album.album_type = AlbumType::Album;
        let mut on_compilation = candidate("Song", "Band");
        on_compilation.album_type = AlbumType::Compilation;

        let scorer = scorer();
        let album_score = scorer.score("Song", "Band", &on_album);
        let compilation_score = scorer.score("Song", "Band", &on_compilation);
        assert!((album_score - compilation_score - ALBUM_BONUS).abs() < f64::EPSILON);
    }

    #[test]
    fn test_recency_uses_explicit_year() {
        let old = candidate("Song", "Band");
        // 2020 release: recent for 2026, stale for 2050.
        assert!(
            MatchScorer::new(2026).score("Song", "Band", &old)
                > MatchScorer::new(2050).score("Song", "Band", &old)
        );
    }

    #[test]
    fn test_explicit_flag_costs_clean_bonus() {
        let clean = candidate("Song", "Band");
        let mut explicit = candidate("Song", "Band");
        explicit.explicit = true;

        let scorer = scorer();
        let delta =
            scorer.score("Song", "Band", &clean) - scorer.score("Song", "Band", &explicit);
        assert!((delta - CLEAN_BONUS).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tie_goes_to_earlier_result() {
        let first = candidate("Song", "Band");
        let second = candidate("Song", "Band");
        assert_eq!(scorer().select_best(&[first, second], "Song", "Band"), 0);
    }

    #[test]
    fn test_gotye_scenario() {
        let mut original = candidate("Somebody That I Used to Know", "Gotye");
        original.popularity = 70;
        original.release_date = Some("2011-07-05".to_string());

        let mut karaoke = candidate(
            "Somebody That I Used To Know - Karaoke Version",
            "Karaoke Band",
        );
        karaoke.popularity = 40;
        karaoke.album_type = AlbumType::Compilation;
        karaoke.release_date = Some("2015-01-01".to_string());

        let selected = MatchScorer::new(2016).select_best(
            &[original, karaoke],
            "SOMEBODY THAT I USED TO KNOW",
            "GOTYE",
        );
        assert_eq!(selected, 0);
    }
}
