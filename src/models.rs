//! Canonical data model shared by every pipeline stage.
//!
//! All sources are mapped onto the fixed field set
//! `symbol, quantity, cost, price, value, invested, date`, exactly these
//! identifiers and casing, end to end.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical fields a source column can map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Symbol,
    Quantity,
    Cost,
    Price,
    Value,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Symbol => "symbol",
            Self::Quantity => "quantity",
            Self::Cost => "cost",
            Self::Price => "price",
            Self::Value => "value",
        }
    }
}

/// One source row after schema normalization. Numeric fields that failed
/// coercion are `None`, never an error; rows without a symbol never get
/// this far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub symbol: String,
    pub quantity: Option<f64>,
    pub cost: Option<f64>,
    pub price: Option<f64>,
    pub value: Option<f64>,
}

/// All normalized rows of a batch, file order then intra-file row order.
/// One symbol may appear many times.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregatedTable {
    pub rows: Vec<NormalizedRow>,
}

/// Which derivation strategy produced a holding's `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    /// quantity x mean current price
    MarkToMarket,
    /// sum of source-provided market values
    Reported,
    /// fell back to invested capital, unrealized P&L treated as zero
    CostBasis,
}

/// One reconciled position, one per distinct symbol. Immutable after
/// construction; not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedHolding {
    pub symbol: String,
    pub quantity: Option<f64>,
    pub cost: Option<f64>,
    pub price: Option<f64>,
    pub invested: Option<f64>,
    pub value: Option<f64>,
    pub value_source: Option<ValueSource>,
}

impl MergedHolding {
    /// Profit/loss: current value minus invested capital.
    pub fn pnl(&self) -> Option<f64> {
        Some(self.value? - self.invested?)
    }
}

/// A single projected cell. Writers render these uniformly: numbers as
/// numbers, empty as an empty cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    pub fn display(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Empty => String::new(),
        }
    }
}

impl From<Option<f64>> for Cell {
    fn from(v: Option<f64>) -> Self {
        match v {
            Some(n) => Self::Number(n),
            None => Self::Empty,
        }
    }
}

/// Read-only field-subset, field-ordered view over the merged holdings,
/// consumed identically by every writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Requested output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    SeekingAlpha,
    Original,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "seeking-alpha" | "seekingalpha" | "sa" => Some(Self::SeekingAlpha),
            "original" => Some(Self::Original),
            _ => None,
        }
    }
}

/// Immutable description of one export run. The pipeline itself holds no
/// session state.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub files: Vec<PathBuf>,
    pub format: ExportFormat,
    pub as_of: NaiveDate,
}

/// A file excluded from the batch, with the reason shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub file: String,
    pub reason: String,
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    pub holdings: Vec<MergedHolding>,
    pub projected: ProjectedTable,
    pub skipped: Vec<SkippedFile>,
}
