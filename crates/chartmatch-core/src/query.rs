//! Search query construction.
//!
//! Each chart entry yields a structured query (field-qualified, quoted)
//! and at most one fallback query (plain space-joined terms). The
//! fallback is tried only when the structured query returns an empty
//! candidate set -- some catalogs tokenize quoted phrases too strictly
//! for titles with punctuation or featuring credits.

/// Which query form produced a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryForm {
    Structured,
    Fallback,
}

/// The two query strings derived from one chart entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub structured: String,
    pub fallback: String,
}

impl SearchQuery {
    /// Build both query forms from a (title, artist) pair.
    ///
    /// Fields are trimmed; internal quote characters are passed through
    /// unmodified, so search behavior for titles containing `"` is
    /// catalog-defined.
    #[must_use]
    pub fn build(title: &str, artist: &str) -> Self {
        Self {
            structured: structured_query(title, artist),
            fallback: fallback_query(title, artist),
        }
    }

    /// The query string for a given form.
    #[must_use]
    pub fn for_form(&self, form: QueryForm) -> &str {
        match form {
            QueryForm::Structured => &self.structured,
            QueryForm::Fallback => &self.fallback,
        }
    }
}

/// `track:"<title>" artist:"<artist>"`, the primary query form.
#[must_use]
pub fn structured_query(title: &str, artist: &str) -> String {
    format!("track:\"{}\" artist:\"{}\"", title.trim(), artist.trim())
}

/// `<title> <artist>`, tried when the structured form finds nothing.
#[must_use]
pub fn fallback_query(title: &str, artist: &str) -> String {
    format!("{} {}", title.trim(), artist.trim())
}
