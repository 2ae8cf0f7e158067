//! Spreadsheet workbook extraction via calamine.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use super::{source_name, trim_empty_rows, RawCellGrid};
use crate::error::ExtractError;

/// Extract one grid per worksheet that carries a header row and data.
pub fn extract(path: &Path) -> Result<Vec<RawCellGrid>, ExtractError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names().to_vec();
    let name = source_name(path);

    let mut grids = Vec::new();
    for sheet in sheet_names {
        let range = match workbook.worksheet_range(&sheet) {
            Ok(r) => r,
            Err(_) => continue,
        };
        let cells: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(cell_str).collect())
            .collect();
        let cells = trim_empty_rows(cells);
        if cells.len() < 2 {
            continue;
        }
        grids.push(RawCellGrid {
            source: format!("{}:{}", name, sheet),
            cells,
        });
    }
    Ok(grids)
}

fn cell_str(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        // Whole-number floats print without the trailing ".0" Excel hides.
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{:?}", e),
    }
}
