//! String similarity primitive used by the match selector.
//!
//! Similarity is Levenshtein-based and normalized to [0, 1], computed
//! over lower-cased inputs with English stop-words stripped. Stripping
//! stop-words keeps "The Monster" and "Monster" close without letting
//! short function words dominate the edit distance of short titles.

/// Words removed (whole-word) from both strings before comparison.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

/// Normalized similarity between two strings, in [0, 1].
///
/// 1.0 means the cleaned strings are identical; this includes the case
/// where both clean to empty (inputs consisting purely of stop-words).
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = strip_stop_words(&a.to_lowercase());
    let b = strip_stop_words(&b.to_lowercase());

    let (longer, shorter) = if a.chars().count() >= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    let longer_len = longer.chars().count();
    if longer_len == 0 {
        return 1.0;
    }

    let distance = levenshtein(&longer, &shorter);
    // Distance never exceeds the longer length under unit-cost edits,
    // so the clamp is a safety net only.
    ((longer_len - distance.min(longer_len)) as f64) / longer_len as f64
}

/// Remove standalone stop-words, re-joining the rest with single spaces.
fn strip_stop_words(s: &str) -> String {
    s.split_whitespace()
        .filter(|word| !STOP_WORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Classic dynamic-programming edit distance (insert/delete/substitute,
/// unit cost each), over Unicode scalar values.
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two-row DP; prev[j] is the distance between a[..i] and b[..j].
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("kitten", "kitten"), 0);
    }

    #[test]
    fn test_levenshtein_classic() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", ""), 0);
    }

    #[test]
    fn test_levenshtein_zero_iff_equal() {
        assert_eq!(levenshtein("gotye", "gotye"), 0);
        assert!(levenshtein("gotye", "goyte") > 0);
    }

    #[test]
    fn test_levenshtein_triangle_inequality() {
        let words = ["monster", "monsters", "minster", "mobster"];
        for a in words {
            for b in words {
                for c in words {
                    assert!(levenshtein(a, c) <= levenshtein(a, b) + levenshtein(b, c));
                }
            }
        }
    }

    #[test]
    fn test_similarity_identical() {
        assert!((similarity("Radioactive", "radioactive") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_similarity_symmetric() {
        let pairs = [
            ("Somebody That I Used to Know", "Somebody"),
            ("Get Lucky", "Lucky Get"),
            ("a", "abcdef"),
        ];
        for (a, b) in pairs {
            assert!((similarity(a, b) - similarity(b, a)).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_similarity_ignores_stop_words() {
        // "the" is stripped from both sides before comparison.
        assert!((similarity("The Monster", "Monster") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_similarity_all_stop_words() {
        assert!((similarity("the and of", "by with") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_similarity_range() {
        let score = similarity("Somebody That I Used to Know", "Titanium");
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_similarity_partial() {
        let close = similarity("Royals", "Royals - Radio Edit");
        let far = similarity("Royals", "Wrecking Ball");
        assert!(close > far);
    }
}
