//! Delimited text output.

use std::path::Path;

use crate::error::WriteError;
use crate::models::ProjectedTable;

pub fn write(table: &ProjectedTable, path: &Path) -> Result<(), WriteError> {
    let mut writer = ::csv::Writer::from_path(path)?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|cell| cell.display()))?;
    }
    writer.flush().map_err(WriteError::Io)?;
    Ok(())
}
