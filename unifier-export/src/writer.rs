//! CSV rendering and file IO.

use std::path::Path;

use unifier_core::{UnifierError, UnifierResult};

use crate::rows::ExportRow;

/// Column order is a contract with downstream consumers of the file.
const CSV_HEADER: [&str; 5] = ["name", "site", "product_id", "price", "confidence"];

/// Renders rows as CSV text. The header line is written even when there
/// are no rows.
pub fn csv_string(rows: &[ExportRow]) -> UnifierResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| UnifierError::internal(format!("Failed to write CSV header: {}", e)))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| UnifierError::internal(format!("Failed to serialize CSV row: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| UnifierError::internal(format!("Failed to flush CSV writer: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| UnifierError::internal(format!("CSV output was not valid UTF-8: {}", e)))
}

/// Writes rows to `path` as CSV.
pub fn write_csv(path: &Path, rows: &[ExportRow]) -> UnifierResult<()> {
    let text = csv_string(rows)?;
    std::fs::write(path, text)
        .map_err(|e| UnifierError::io(format!("Failed to write {}: {}", path.display(), e)))
}

/// Parses CSV text produced by [`csv_string`] back into rows.
pub fn read_rows(text: &str) -> UnifierResult<Vec<ExportRow>> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    reader
        .deserialize()
        .collect::<Result<Vec<ExportRow>, _>>()
        .map_err(|e| UnifierError::parse(format!("Failed to parse CSV: {}", e)))
}
