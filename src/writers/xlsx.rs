//! Spreadsheet workbook output.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::error::WriteError;
use crate::models::{Cell, ProjectedTable};

pub fn write(table: &ProjectedTable, path: &Path) -> Result<(), WriteError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Holdings")?;

    for (col, name) in table.columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, name, &bold)?;
    }
    for (idx, row) in table.rows.iter().enumerate() {
        let row_num = (idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Number(n) => {
                    sheet.write_number(row_num, col as u16, *n)?;
                }
                Cell::Text(s) => {
                    sheet.write_string(row_num, col as u16, s)?;
                }
                Cell::Empty => {}
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}
