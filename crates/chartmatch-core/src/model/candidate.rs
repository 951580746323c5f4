use serde::{Deserialize, Serialize};

/// The release type a candidate appears on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlbumType {
    Album,
    Single,
    Compilation,
    #[serde(other)]
    Other,
}

impl AlbumType {
    /// Parse a catalog album-type string, mapping unknown values to
    /// [`AlbumType::Other`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "album" => Self::Album,
            "single" => Self::Single,
            "compilation" => Self::Compilation,
            _ => Self::Other,
        }
    }
}

/// One catalog search result.
///
/// Candidates are never mutated; the selector scores them and picks one
/// by index into the search-result order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Opaque catalog identifier, used later for playlist operations.
    pub id: String,

    /// Display name of the track.
    pub name: String,

    /// Primary artist (first credited).
    pub artist: String,

    /// All credited artist names, primary first.
    #[serde(default)]
    pub all_artists: Vec<String>,

    pub album_name: String,
    pub album_type: AlbumType,

    /// ISO release date ("2011-07-05" or just "2011"); absent for some
    /// catalog entries.
    pub release_date: Option<String>,

    pub explicit: bool,

    /// Catalog popularity, 0-100.
    pub popularity: u8,

    /// Track length in milliseconds.
    pub duration_ms: u64,

    /// Pass-through fields, not used in scoring.
    pub preview_url: Option<String>,
    pub external_url: Option<String>,
}

impl Candidate {
    /// The release year, when a parseable release date is present.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        let date = self.release_date.as_deref()?;
        date.split('-').next()?.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(release_date: Option<&str>) -> Candidate {
        Candidate {
            id: "t1".to_string(),
            name: "Song".to_string(),
            artist: "Band".to_string(),
            all_artists: vec!["Band".to_string()],
            album_name: "Album".to_string(),
            album_type: AlbumType::Album,
            release_date: release_date.map(String::from),
            explicit: false,
            popularity: 50,
            duration_ms: 200_000,
            preview_url: None,
            external_url: None,
        }
    }

    #[test]
    fn test_album_type_parse() {
        assert_eq!(AlbumType::parse("album"), AlbumType::Album);
        assert_eq!(AlbumType::parse("SINGLE"), AlbumType::Single);
        assert_eq!(AlbumType::parse("compilation"), AlbumType::Compilation);
        assert_eq!(AlbumType::parse("appears_on"), AlbumType::Other);
    }

    #[test]
    fn test_release_year_from_full_date() {
        assert_eq!(candidate(Some("2011-07-05")).release_year(), Some(2011));
    }

    #[test]
    fn test_release_year_from_year_only() {
        assert_eq!(candidate(Some("1998")).release_year(), Some(1998));
    }

    #[test]
    fn test_release_year_absent() {
        assert_eq!(candidate(None).release_year(), None);
        assert_eq!(candidate(Some("unknown")).release_year(), None);
    }
}
