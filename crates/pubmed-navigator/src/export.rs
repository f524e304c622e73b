//! Spreadsheet export of fetched records.
//!
//! One row per record, five columns, header row, no formatting. The
//! buffer is what the UI surface offers for download.

use crate::error::PipelineResult;
use crate::models::ArticleRecord;

/// Column headers, in order.
pub const CSV_HEADERS: [&str; 5] =
    ["Title", "Authors", "Abstract", "Publication Date", "Journal"];

/// Serialize records into an in-memory CSV buffer.
///
/// Missing fields appear as their "No <field>" sentinels. Deterministic
/// for a given record list.
///
/// # Errors
///
/// Returns error if CSV serialization fails.
pub fn write_csv(records: &[ArticleRecord]) -> PipelineResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;
    for record in records {
        let authors = record.author_names();
        writer.write_record([
            record.title_or_default(),
            authors.as_str(),
            record.abstract_or_default(),
            record.date_or_default(),
            record.journal_or_default(),
        ])?;
    }

    Ok(writer.into_inner().expect("csv writer flushes into Vec"))
}
