//! Lenient decoder for one delimited GTFS table.
//!
//! The first line is a comma-separated header; every following non-blank
//! line is a record. Values are trimmed, blank lines skipped, ragged rows
//! tolerated. This is not a general CSV parser: feed fields are expected to
//! never contain embedded delimiters.

use serde::de::DeserializeOwned;
use tracing::warn;

/// Decodes a table's raw text into typed records.
///
/// Rows that fail to deserialize (wrong field count, unparseable numeric)
/// are skipped and counted rather than failing the table. Input without a
/// header line yields an empty vector.
pub fn decode_table<T: DeserializeOwned>(name: &str, text: &str) -> Vec<T> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.deserialize() {
        match result {
            Ok(row) => rows.push(row),
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(table = name, skipped, "Skipped undecodable rows");
    }

    rows
}
