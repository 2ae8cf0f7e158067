//! The ingestion-and-reconciliation pipeline, start to finish.
//!
//! One export request is processed synchronously: raw files are
//! extracted and normalized per file, aggregated into one long table,
//! reconciled per symbol, then projected into the requested shape.

use crate::aggregate::aggregate;
use crate::error::PipelineError;
use crate::models::{ExportRequest, MergeReport};
use crate::project::project;
use crate::reconcile::reconcile;

/// Run one export batch. Per-file failures are recovered into the
/// report's skipped list; only a batch with zero usable rows is terminal.
pub fn run(request: &ExportRequest) -> Result<MergeReport, PipelineError> {
    log::info!("processing {} file(s)", request.files.len());

    let (table, skipped) = aggregate(&request.files);
    if table.rows.is_empty() {
        return Err(PipelineError::EmptyBatch { skipped });
    }

    let holdings = reconcile(&table);
    let projected = project(&holdings, request.format, request.as_of);

    Ok(MergeReport {
        holdings,
        projected,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExportFormat;
    use crate::writers;
    use chrono::NaiveDate;
    use std::io::Write;
    use std::path::{Path, PathBuf};

    fn csv_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn request(files: Vec<PathBuf>, format: ExportFormat) -> ExportRequest {
        ExportRequest {
            files,
            format,
            as_of: NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
        }
    }

    #[test]
    fn test_two_file_merge_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let a = csv_file(
            dir.path(),
            "a.csv",
            "Ticker,Total Shares Held,Average Cost (USD)\nAAPL,10,100\n",
        );
        let b = csv_file(
            dir.path(),
            "b.csv",
            "Ticker,Total Shares Held,Average Cost (USD)\nAAPL,5,130\n",
        );

        let report = run(&request(vec![a, b], ExportFormat::SeekingAlpha)).unwrap();
        assert!(report.skipped.is_empty());
        assert_eq!(report.holdings.len(), 1);
        assert_eq!(report.holdings[0].symbol, "AAPL");
        assert_eq!(report.holdings[0].quantity, Some(15.0));
        assert_eq!(report.holdings[0].cost, Some(110.0));
        assert_eq!(
            report.projected.columns,
            vec!["symbol", "quantity", "cost", "date"]
        );
    }

    #[test]
    fn test_unreadable_file_among_valid_ones() {
        let dir = tempfile::tempdir().unwrap();
        let a = csv_file(dir.path(), "a.csv", "Ticker,Total Shares Held\nAAPL,10\n");
        let bad = dir.path().join("bad.csv");
        let c = csv_file(dir.path(), "c.csv", "Ticker,Total Shares Held\nMSFT,5\n");

        let report = run(&request(vec![a, bad, c], ExportFormat::Original)).unwrap();
        assert_eq!(report.holdings.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].file, "bad.csv");
    }

    #[test]
    fn test_empty_batch_is_terminal() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("nothing.csv");

        let err = run(&request(vec![bad], ExportFormat::Original)).unwrap_err();
        let PipelineError::EmptyBatch { skipped } = err;
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].file, "nothing.csv");
    }

    #[test]
    fn test_original_export_reimports_to_same_reconciled_shape() {
        let dir = tempfile::tempdir().unwrap();
        let a = csv_file(
            dir.path(),
            "a.csv",
            "Ticker,Total Shares Held,Average Cost (USD)\nAAPL,10,100\nMSFT,8,50\n",
        );
        let b = csv_file(
            dir.path(),
            "b.csv",
            "Ticker,Total Shares Held,Average Cost (USD)\nAAPL,5,130\n",
        );

        let first = run(&request(vec![a, b], ExportFormat::Original)).unwrap();

        let out = dir.path().join("export.csv");
        writers::write_table(&first.projected, &out).unwrap();

        let second = run(&request(vec![out], ExportFormat::Original)).unwrap();
        assert_eq!(second.holdings.len(), first.holdings.len());
        for (re, orig) in second.holdings.iter().zip(&first.holdings) {
            assert_eq!(re.symbol, orig.symbol);
            assert_eq!(re.quantity, orig.quantity);
            assert_eq!(re.cost, orig.cost);
            assert_eq!(re.invested, orig.invested);
        }
    }
}
