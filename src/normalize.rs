//! Schema normalization: map arbitrary source columns onto the canonical
//! field set and coerce values to numbers.
//!
//! The header mapping is a data-driven ordered rule table rather than
//! branching code, so new source schemas are a new row plus a test.

use std::collections::HashMap;

use crate::error::SchemaMismatch;
use crate::extract::RawCellGrid;
use crate::models::{Field, NormalizedRow};

/// One header-matching rule: a column whose (lowercased, newline-collapsed)
/// title contains every keyword maps onto the canonical field.
pub struct ColumnRule {
    pub keywords: &'static [&'static str],
    pub field: Field,
}

/// Rules in fixed priority order; the first rule matching a column wins,
/// and the first column claiming a field keeps it. Overlapping keywords
/// ("share" vs "price") therefore resolve deterministically.
pub const COLUMN_RULES: &[ColumnRule] = &[
    ColumnRule { keywords: &["ticker"], field: Field::Symbol },
    ColumnRule { keywords: &["symbol"], field: Field::Symbol },
    ColumnRule { keywords: &["share"], field: Field::Quantity },
    ColumnRule { keywords: &["quantity"], field: Field::Quantity },
    ColumnRule { keywords: &["cost"], field: Field::Cost },
    ColumnRule { keywords: &["price", "current"], field: Field::Price },
    ColumnRule { keywords: &["value", "current"], field: Field::Value },
];

/// Map one raw header onto a canonical field, if any rule matches.
pub fn map_header(header: &str) -> Option<Field> {
    let needle = header.replace('\n', " ").trim().to_lowercase();
    COLUMN_RULES
        .iter()
        .find(|rule| rule.keywords.iter().all(|k| needle.contains(k)))
        .map(|rule| rule.field)
}

/// Normalize one grid. Fails only when no column maps to `symbol`, the
/// single required field; every other canonical field is optional per
/// source. Rows whose symbol cell is empty are dropped; numeric cells
/// that fail coercion become `None`. Pure transform, no side effects.
pub fn normalize(grid: &RawCellGrid) -> Result<Vec<NormalizedRow>, SchemaMismatch> {
    let mut mapping: HashMap<Field, usize> = HashMap::new();
    for (idx, raw) in grid.header().iter().enumerate() {
        if let Some(field) = map_header(raw) {
            mapping.entry(field).or_insert(idx);
        }
    }

    let Some(&symbol_col) = mapping.get(&Field::Symbol) else {
        return Err(SchemaMismatch(grid.header().to_vec()));
    };

    let numeric = |row: &[String], field: Field| -> Option<f64> {
        mapping
            .get(&field)
            .and_then(|&idx| row.get(idx))
            .and_then(|cell| parse_decimal(cell))
    };

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for raw_row in grid.data_rows() {
        let symbol = raw_row
            .get(symbol_col)
            .map(|s| s.trim())
            .unwrap_or_default();
        if symbol.is_empty() {
            dropped += 1;
            continue;
        }
        rows.push(NormalizedRow {
            symbol: symbol.to_string(),
            quantity: numeric(raw_row, Field::Quantity),
            cost: numeric(raw_row, Field::Cost),
            price: numeric(raw_row, Field::Price),
            value: numeric(raw_row, Field::Value),
        });
    }
    if dropped > 0 {
        log::debug!("{}: dropped {} row(s) without a symbol", grid.source, dropped);
    }
    Ok(rows)
}

/// Parse a US-format decimal ("1,234.56", "$110.25") as floating point.
pub fn parse_decimal(cell: &str) -> Option<f64> {
    let cleaned = cell.trim().trim_start_matches('$').replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}
