//! Writers: encode a projected table to disk.
//!
//! The output encoding is dispatched on the target path's extension,
//! mirroring the extractor front door.

pub mod csv;
pub mod pdf;
pub mod xlsx;

use std::path::Path;

use crate::error::WriteError;
use crate::models::ProjectedTable;

/// Write the projected table to `path`, picking the encoder from the
/// extension.
pub fn write_table(table: &ProjectedTable, path: &Path) -> Result<(), WriteError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => csv::write(table, path),
        "xlsx" => xlsx::write(table, path),
        "pdf" => pdf::write(table, path),
        other => Err(WriteError::Unsupported(other.to_string())),
    }
}
