//! Error taxonomy for the ingestion-and-reconciliation pipeline.
//!
//! Extraction and schema errors are recovered at file granularity by the
//! aggregator; only `EmptyBatch` and writer failures abort an export.

use thiserror::Error;

/// Failure turning one input artifact into raw cell grids.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file type: .{0}")]
    Unsupported(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("pdf error: {0}")]
    Pdf(String),
    #[error("no tabular content found")]
    NoTable,
}

/// No column of the source mapped to `symbol`, the single required field.
#[derive(Debug, Error)]
#[error("no column maps to symbol (headers: {0:?})")]
pub struct SchemaMismatch(pub Vec<String>);

/// Failure encoding a projected table to disk.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("unsupported output type: .{0}")]
    Unsupported(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("pdf error: {0}")]
    Pdf(String),
}

/// Batch-level failure of one export run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no valid holdings data found in any input file")]
    EmptyBatch {
        skipped: Vec<crate::models::SkippedFile>,
    },
}
