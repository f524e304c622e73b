//! Bibliographic record model for fetched PubMed articles.

use serde::{Deserialize, Serialize};

/// A bibliographic record parsed from a MEDLINE entry.
///
/// All fields except `authors` are optional; accessors substitute the
/// "No <field>" sentinels expected by the export surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Article title (MEDLINE `TI`).
    #[serde(default)]
    pub title: Option<String>,

    /// Authors in citation order (MEDLINE `AU`, repeated).
    #[serde(default)]
    pub authors: Vec<String>,

    /// Abstract text (MEDLINE `AB`).
    #[serde(default)]
    pub r#abstract: Option<String>,

    /// Publication date as printed (MEDLINE `DP`).
    #[serde(default)]
    pub publication_date: Option<String>,

    /// Journal title abbreviation (MEDLINE `TA`).
    #[serde(default)]
    pub journal: Option<String>,
}

impl ArticleRecord {
    /// Get the title, falling back to "No title".
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("No title")
    }

    /// Get the abstract, falling back to "No abstract".
    #[must_use]
    pub fn abstract_or_default(&self) -> &str {
        self.r#abstract.as_deref().unwrap_or("No abstract")
    }

    /// Get the publication date, falling back to "No date".
    #[must_use]
    pub fn date_or_default(&self) -> &str {
        self.publication_date.as_deref().unwrap_or("No date")
    }

    /// Get the journal, falling back to "No journal".
    #[must_use]
    pub fn journal_or_default(&self) -> &str {
        self.journal.as_deref().unwrap_or("No journal")
    }

    /// Get author names as a comma-separated string, or "No authors".
    #[must_use]
    pub fn author_names(&self) -> String {
        if self.authors.is_empty() {
            "No authors".to_string()
        } else {
            self.authors.join(", ")
        }
    }

    /// True if both the title and the abstract are present.
    ///
    /// Extraction only runs over records that pass this check.
    #[must_use]
    pub const fn has_text(&self) -> bool {
        self.title.is_some() && self.r#abstract.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_defaults() {
        let record = ArticleRecord::default();
        assert_eq!(record.title_or_default(), "No title");
        assert_eq!(record.abstract_or_default(), "No abstract");
        assert_eq!(record.date_or_default(), "No date");
        assert_eq!(record.journal_or_default(), "No journal");
        assert_eq!(record.author_names(), "No authors");
    }

    #[test]
    fn test_author_names_joined() {
        let record = ArticleRecord {
            authors: vec!["Smith J".to_string(), "Doe A".to_string()],
            ..Default::default()
        };
        assert_eq!(record.author_names(), "Smith J, Doe A");
    }

    #[test]
    fn test_has_text() {
        let mut record = ArticleRecord { title: Some("T".to_string()), ..Default::default() };
        assert!(!record.has_text());
        record.r#abstract = Some("A".to_string());
        assert!(record.has_text());
    }
}
