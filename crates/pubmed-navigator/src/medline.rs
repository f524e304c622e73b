//! Parser for MEDLINE-format text records returned by efetch.
//!
//! A MEDLINE entry is a sequence of `TAG - value` lines where the tag is
//! padded to four characters; continuation lines are indented with six
//! spaces and extend the previous value. Entries are separated by blank
//! lines. Only the fields consumed by the pipeline (TI, AU, AB, DP, TA)
//! are kept.

use crate::models::ArticleRecord;

/// Parse a MEDLINE text blob into article records.
///
/// Unknown tags are ignored, missing fields stay `None`, and an empty or
/// whitespace-only input yields an empty vector.
#[must_use]
pub fn parse_medline(text: &str) -> Vec<ArticleRecord> {
    let mut records = Vec::new();
    let mut current: Vec<(String, String)> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                records.push(build_record(&current));
                current.clear();
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("      ") {
            // Continuation of the previous field
            if let Some((_, value)) = current.last_mut() {
                value.push(' ');
                value.push_str(rest.trim());
            }
        } else if let (Some(tag), Some("- "), Some(value)) =
            (line.get(..4), line.get(4..6), line.get(6..))
        {
            current.push((tag.trim().to_string(), value.trim().to_string()));
        }
        // Lines matching neither shape are ignored
    }

    if !current.is_empty() {
        records.push(build_record(&current));
    }

    records
}

/// Fold the tagged fields of one entry into an `ArticleRecord`.
fn build_record(fields: &[(String, String)]) -> ArticleRecord {
    let mut record = ArticleRecord::default();

    for (tag, value) in fields {
        match tag.as_str() {
            "TI" => record.title = Some(value.clone()),
            "AU" => record.authors.push(value.clone()),
            "AB" => record.r#abstract = Some(value.clone()),
            "DP" => record.publication_date = Some(value.clone()),
            "TA" => record.journal = Some(value.clone()),
            _ => {}
        }
    }

    record
}
