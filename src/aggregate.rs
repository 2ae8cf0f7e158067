//! Per-file extraction and normalization into one long table.
//!
//! Files are processed independently; a failure on one file adds it to
//! the skipped list and the batch continues. No file aborts an export.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::{extract_file, source_name, RawCellGrid};
use crate::models::{AggregatedTable, NormalizedRow, SkippedFile};
use crate::normalize::normalize;

/// Index-artifact columns some exporters emit ("Unnamed: 0" and friends).
static PLACEHOLDER_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^unnamed(:\s*\d+)?$").unwrap());

/// Concatenate the normalized rows of every readable file, in file order
/// then intra-file row order. Unreadable or schema-less files land in the
/// skipped list with a user-facing reason.
pub fn aggregate(files: &[PathBuf]) -> (AggregatedTable, Vec<SkippedFile>) {
    let mut table = AggregatedTable::default();
    let mut skipped = Vec::new();

    for path in files {
        let name = source_name(path);
        match aggregate_one(path) {
            Ok(rows) if rows.is_empty() => {
                log::warn!("skipping {}: no usable rows", name);
                skipped.push(SkippedFile {
                    file: name,
                    reason: "no usable rows".to_string(),
                });
            }
            Ok(mut rows) => {
                log::info!("{}: {} row(s) ingested", name, rows.len());
                table.rows.append(&mut rows);
            }
            Err(reason) => {
                log::warn!("skipping {}: {}", name, reason);
                skipped.push(SkippedFile { file: name, reason });
            }
        }
    }

    (table, skipped)
}

fn aggregate_one(path: &Path) -> Result<Vec<NormalizedRow>, String> {
    let grids = extract_file(path).map_err(|e| e.to_string())?;

    let mut rows = Vec::new();
    let mut mismatch: Option<String> = None;
    for grid in grids {
        let grid = strip_placeholder_columns(grid);
        match normalize(&grid) {
            Ok(mut normalized) => rows.append(&mut normalized),
            // One unusable sheet/page is only fatal when nothing else in
            // the file normalizes.
            Err(e) => mismatch = Some(e.to_string()),
        }
    }
    if rows.is_empty() {
        if let Some(reason) = mismatch {
            return Err(reason);
        }
    }
    Ok(rows)
}

/// Drop columns whose header is empty or a placeholder artifact before the
/// grid reaches the normalizer.
pub fn strip_placeholder_columns(mut grid: RawCellGrid) -> RawCellGrid {
    let keep: Vec<bool> = grid
        .header()
        .iter()
        .map(|h| {
            let title = h.trim();
            !title.is_empty() && !PLACEHOLDER_HEADER.is_match(title)
        })
        .collect();
    if keep.iter().all(|&k| k) {
        return grid;
    }
    for row in &mut grid.cells {
        let mut idx = 0;
        row.retain(|_| {
            let kept = keep.get(idx).copied().unwrap_or(true);
            idx += 1;
            kept
        });
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn csv_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_aggregate_preserves_file_then_row_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = csv_file(
            dir.path(),
            "a.csv",
            "Ticker,Total Shares Held,Average Cost (USD)\nAAPL,10,100\nMSFT,5,250\n",
        );
        let b = csv_file(
            dir.path(),
            "b.csv",
            "Ticker,Total Shares Held,Average Cost (USD)\nAAPL,5,130\n",
        );

        let (table, skipped) = aggregate(&[a, b]);
        assert!(skipped.is_empty());
        let symbols: Vec<&str> = table.rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT", "AAPL"]);
    }

    #[test]
    fn test_bad_file_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let good = csv_file(
            dir.path(),
            "good.csv",
            "Ticker,Total Shares Held\nAAPL,10\n",
        );
        let missing = dir.path().join("missing.csv");
        let no_symbol = csv_file(dir.path(), "nosym.csv", "Shares,Cost\n10,100\n");

        let (table, skipped) = aggregate(&[good, missing, no_symbol]);
        assert_eq!(table.rows.len(), 1);
        let names: Vec<&str> = skipped.iter().map(|s| s.file.as_str()).collect();
        assert_eq!(names, vec!["missing.csv", "nosym.csv"]);
    }

    #[test]
    fn test_column_union_across_files() {
        let dir = tempfile::tempdir().unwrap();
        let with_cost = csv_file(
            dir.path(),
            "cost.csv",
            "Ticker,Total Shares Held,Average Cost (USD)\nAAPL,10,100\n",
        );
        let without_cost = csv_file(dir.path(), "bare.csv", "Symbol,Shares\nAAPL,5\n");

        let (table, skipped) = aggregate(&[with_cost, without_cost]);
        assert!(skipped.is_empty());
        assert_eq!(table.rows[0].cost, Some(100.0));
        assert_eq!(table.rows[1].cost, None);
        assert_eq!(table.rows[1].quantity, Some(5.0));
    }

    #[test]
    fn test_strip_placeholder_columns() {
        let grid = RawCellGrid {
            source: "t".into(),
            cells: vec![
                vec!["Unnamed: 0".into(), "Ticker".into(), "".into(), "Shares".into()],
                vec!["0".into(), "AAPL".into(), "x".into(), "10".into()],
            ],
        };
        let stripped = strip_placeholder_columns(grid);
        assert_eq!(stripped.header(), &["Ticker", "Shares"]);
        assert_eq!(stripped.data_rows()[0], vec!["AAPL", "10"]);
    }
}
