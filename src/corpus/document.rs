//! Document records and date normalization
//!
//! Fixture dates come in three shapes — `YYYY-MM-DD`, `YYYY-MM`, `YYYY` —
//! and a fair number of items carry no usable date at all. Every document
//! gets a sortable [`DateKey`] with missing parts zeroed, so chronological
//! ordering works across precision levels. Undated documents sort last.

use super::types::DocId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Sortable date with partial precision
///
/// Missing month/day are stored as 0, which orders a bare year before any
/// dated item within that year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DateKey {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateKey {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        DateKey { year, month, day }
    }
}

/// Parse a raw fixture date into a sortable key
///
/// Accepts `YYYY`, `YYYY-MM`, and `YYYY-MM-DD`. Full dates must be real
/// calendar days. Anything else yields `None` (the document stays in the
/// corpus but sorts after every dated item).
pub fn parse_date(raw: &str) -> Option<DateKey> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let mut parts = raw.splitn(3, '-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = match parts.next() {
        Some(m) => m.parse().ok()?,
        None => return Some(DateKey::new(year, 0, 0)),
    };
    if !(1..=12).contains(&month) {
        return None;
    }
    let day: u32 = match parts.next() {
        Some(d) => d.parse().ok()?,
        None => return Some(DateKey::new(year, month, 0)),
    };

    NaiveDate::from_ymd_opt(year, month, day)?;
    Some(DateKey::new(year, month, day))
}

/// A single item from the collected works
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique identifier from the fixture
    pub id: DocId,

    /// Title as printed in the collected works
    pub title: String,

    /// Raw date string from the fixture (kept for display)
    pub raw_date: String,

    /// Normalized sortable date, if the raw date parsed
    pub date: Option<DateKey>,

    /// Place of writing/delivery, when known
    pub location: Option<String>,

    /// Themes tagged on this document
    pub themes: BTreeSet<String>,

    /// Full text
    pub text: String,
}

impl Document {
    /// Create a document, normalizing the raw date
    pub fn new(
        id: impl Into<DocId>,
        title: impl Into<String>,
        raw_date: impl Into<String>,
        location: Option<&str>,
        themes: impl IntoIterator<Item = impl Into<String>>,
        text: impl Into<String>,
    ) -> Self {
        let raw_date = raw_date.into();
        let date = parse_date(&raw_date);
        Document {
            id: id.into(),
            title: title.into(),
            raw_date,
            date,
            location: location.map(|l| l.to_string()),
            themes: themes.into_iter().map(Into::into).collect(),
            text: text.into(),
        }
    }

    /// Year component of the normalized date
    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year)
    }

    /// Check whether this document carries a theme
    pub fn has_theme(&self, theme: &str) -> bool {
        self.themes.contains(theme)
    }

    /// Sort key: dated documents in chronological order, undated last,
    /// ties broken by id for determinism
    pub fn sort_key(&self) -> (bool, Option<DateKey>, DocId) {
        (self.date.is_none(), self.date, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_date() {
        assert_eq!(parse_date("1915-01-09"), Some(DateKey::new(1915, 1, 9)));
    }

    #[test]
    fn test_parse_partial_dates() {
        assert_eq!(parse_date("1930-03"), Some(DateKey::new(1930, 3, 0)));
        assert_eq!(parse_date("1942"), Some(DateKey::new(1942, 0, 0)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("circa 1920"), None);
        assert_eq!(parse_date("1920-13"), None);
        assert_eq!(parse_date("1921-02-30"), None);
    }

    #[test]
    fn test_date_key_ordering() {
        // Bare year sorts before any dated item in that year
        assert!(DateKey::new(1915, 0, 0) < DateKey::new(1915, 1, 1));
        assert!(DateKey::new(1915, 1, 9) < DateKey::new(1915, 2, 1));
        assert!(DateKey::new(1914, 12, 31) < DateKey::new(1915, 0, 0));
    }

    #[test]
    fn test_document_year() {
        let doc = Document::new(
            1,
            "Hind Swaraj",
            "1909-11",
            None,
            ["Swaraj"],
            "…",
        );
        assert_eq!(doc.year(), Some(1909));
        assert!(doc.has_theme("Swaraj"));
        assert!(!doc.has_theme("Education"));
    }

    #[test]
    fn test_undated_sorts_last() {
        let dated = Document::new(1, "a", "1920-01-01", None, Vec::<String>::new(), "");
        let undated = Document::new(2, "b", "n.d.", None, Vec::<String>::new(), "");
        assert!(dated.sort_key() < undated.sort_key());
    }
}
