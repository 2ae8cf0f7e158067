//! Table extraction from uploaded artifacts.
//!
//! Each input file yields zero or more raw cell grids with a header row.
//! Container decoding is delegated per extension: spreadsheets to
//! calamine, delimited text to the csv crate, paginated documents to
//! pdf-extract plus whitespace-run column splitting.

pub mod csv;
pub mod pdf;
pub mod repair;
pub mod xlsx;

use std::path::Path;

use serde::Serialize;

use crate::error::ExtractError;

/// A two-dimensional grid of string cells; row 0 is the header.
/// Produced transiently per source file/page, discarded after
/// normalization.
#[derive(Debug, Clone, Serialize)]
pub struct RawCellGrid {
    /// Where the grid came from, for logs: `file`, `file:Sheet1`,
    /// `file:page2`.
    pub source: String,
    pub cells: Vec<Vec<String>>,
}

impl RawCellGrid {
    pub fn header(&self) -> &[String] {
        self.cells.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn data_rows(&self) -> &[Vec<String>] {
        if self.cells.len() > 1 {
            &self.cells[1..]
        } else {
            &[]
        }
    }

    /// A grid needs a header and at least one data row to be worth
    /// normalizing.
    pub fn is_usable(&self) -> bool {
        self.cells.len() >= 2
    }
}

/// Extract all cell grids from one file, dispatching on its extension.
pub fn extract_file(path: &Path) -> Result<Vec<RawCellGrid>, ExtractError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let grids = match ext.as_str() {
        "xlsx" | "xls" => xlsx::extract(path)?,
        "csv" => csv::extract(path)?,
        "pdf" => pdf::extract(path)?,
        other => return Err(ExtractError::Unsupported(other.to_string())),
    };

    let grids: Vec<RawCellGrid> = grids.into_iter().filter(RawCellGrid::is_usable).collect();
    if grids.is_empty() {
        return Err(ExtractError::NoTable);
    }
    log::debug!("{}: {} grid(s) extracted", path.display(), grids.len());
    Ok(grids)
}

/// Drop leading and trailing rows that are entirely empty. Exports often
/// carry a blank banner row above the header and padding below the data.
pub(crate) fn trim_empty_rows(mut rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let is_empty = |row: &Vec<String>| row.iter().all(|c| c.trim().is_empty());
    while rows.first().is_some_and(&is_empty) {
        rows.remove(0);
    }
    while rows.last().is_some_and(&is_empty) {
        rows.pop();
    }
    rows
}

pub(crate) fn source_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}
