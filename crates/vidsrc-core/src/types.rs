//! Data types for the title lookup
//!
//! Candidates are produced by the parser and never mutated afterwards.
//! All types implement Serialize and Deserialize for JSON output.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type label the provider uses for episodic titles
pub const SERIES_LABEL: &str = "TV Series";

/// Label used when the provider shows no type for a result
pub const DEFAULT_LABEL: &str = "Movie";

/// Kind of media a candidate refers to
///
/// Derived once from the provider's free-text type label. Only the exact
/// label `"TV Series"` counts as episodic; every other label is kept as
/// [`MediaKind::Other`] and is treated like a movie by the dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    /// Feature film, or no type label at all
    Movie,
    /// Episodic title (label is exactly "TV Series")
    Series,
    /// Any other label ("TV Mini Series", "Video Game", ...)
    Other,
}

impl MediaKind {
    /// Classify a trimmed type label.
    ///
    /// # Examples
    /// ```
    /// use vidsrc_core::MediaKind;
    ///
    /// assert_eq!(MediaKind::from_label("TV Series"), MediaKind::Series);
    /// assert_eq!(MediaKind::from_label("Movie"), MediaKind::Movie);
    /// assert_eq!(MediaKind::from_label("TV Mini Series"), MediaKind::Other);
    /// ```
    pub fn from_label(label: &str) -> Self {
        match label {
            SERIES_LABEL => MediaKind::Series,
            DEFAULT_LABEL => MediaKind::Movie,
            _ => MediaKind::Other,
        }
    }

    /// Whether the dialogue should ask for season and episode
    pub fn is_episodic(&self) -> bool {
        matches!(self, MediaKind::Series)
    }
}

/// One parsed search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Display title
    pub title: String,
    /// Year text as shown by the provider (e.g. "2010" or "1994–2004")
    pub year: String,
    /// Kind inferred from the type label
    pub kind: MediaKind,
    /// Trimmed type label, "Movie" when the provider shows none
    pub label: String,
    /// Provider identifier (`tt` followed by digits)
    pub external_id: String,
}

impl Candidate {
    /// Build a candidate, deriving the kind from the label.
    pub fn new(
        title: impl Into<String>,
        year: impl Into<String>,
        label: impl Into<String>,
        external_id: impl Into<String>,
    ) -> Self {
        let label = label.into();
        Self {
            title: title.into(),
            year: year.into(),
            kind: MediaKind::from_label(&label),
            label,
            external_id: external_id.into(),
        }
    }
}

/// Formats as `Title (Year) - Label`, the form used in result listings.
impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {}", self.title, self.year, self.label)
    }
}
