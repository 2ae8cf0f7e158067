//! Delimited text extraction.

use std::path::Path;

use super::{source_name, trim_empty_rows, RawCellGrid};
use crate::error::ExtractError;

/// Read a delimited file into a single grid. Records may vary in length;
/// the normalizer treats missing trailing cells as empty.
pub fn extract(path: &Path) -> Result<Vec<RawCellGrid>, ExtractError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut cells = Vec::new();
    for record in reader.records() {
        let record = record?;
        cells.push(record.iter().map(|c| c.trim().to_string()).collect());
    }

    let cells = trim_empty_rows(cells);
    if cells.is_empty() {
        return Ok(Vec::new());
    }
    Ok(vec![RawCellGrid {
        source: source_name(path),
        cells,
    }])
}
