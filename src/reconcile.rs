//! Reconciliation: fold every occurrence of a symbol across the
//! aggregated table into one holding.
//!
//! Merge policy for partial rows: a row enters the weighted-average cost
//! (numerator and denominator) only when both quantity and cost are
//! present. A quantity-only row still grows the summed position.

use std::collections::HashMap;

use crate::models::{AggregatedTable, MergedHolding, NormalizedRow, ValueSource};

/// Group the aggregated table by exact symbol and merge each group.
/// Output order is first-appearance order, not alphabetical.
pub fn reconcile(table: &AggregatedTable) -> Vec<MergedHolding> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&NormalizedRow>> = HashMap::new();
    for row in &table.rows {
        let group = groups.entry(row.symbol.as_str()).or_default();
        if group.is_empty() {
            order.push(row.symbol.as_str());
        }
        group.push(row);
    }

    let holdings: Vec<MergedHolding> = order
        .into_iter()
        .map(|symbol| merge_group(symbol, &groups[symbol]))
        .collect();
    log::info!(
        "reconciled {} row(s) into {} holding(s)",
        table.rows.len(),
        holdings.len()
    );
    holdings
}

fn merge_group(symbol: &str, rows: &[&NormalizedRow]) -> MergedHolding {
    let quantity = sum_present(rows.iter().map(|r| r.quantity));

    let mut dollars = 0.0;
    let mut units = 0.0;
    for row in rows {
        if let (Some(q), Some(c)) = (row.quantity, row.cost) {
            dollars += q * c;
            units += q;
        }
    }
    // Zero total weighted quantity leaves the cost basis undefined, never
    // NaN or a division error.
    let cost = (units != 0.0).then(|| dollars / units);

    let prices: Vec<f64> = rows.iter().filter_map(|r| r.price).collect();
    let price = (!prices.is_empty()).then(|| prices.iter().sum::<f64>() / prices.len() as f64);

    let invested = match (quantity, cost) {
        (Some(q), Some(c)) => Some(q * c),
        _ => None,
    };

    let reported = sum_present(rows.iter().map(|r| r.value));
    let (value, value_source) = derive_value(quantity, price, reported, invested);

    MergedHolding {
        symbol: symbol.to_string(),
        quantity,
        cost,
        price,
        invested,
        value,
        value_source,
    }
}

/// Sum the present values; `None` when no row carried one.
fn sum_present(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    values
        .flatten()
        .fold(None, |acc, v| Some(acc.unwrap_or(0.0) + v))
}

/// Prioritized value derivation: mark-to-market, then source-reported
/// value, then cost basis (unrealized P&L treated as zero). The firing
/// strategy is reported alongside the value.
fn derive_value(
    quantity: Option<f64>,
    price: Option<f64>,
    reported: Option<f64>,
    invested: Option<f64>,
) -> (Option<f64>, Option<ValueSource>) {
    let mark = match (quantity, price) {
        (Some(q), Some(p)) => Some(q * p),
        _ => None,
    };
    let chain = [
        (ValueSource::MarkToMarket, mark),
        (ValueSource::Reported, reported),
        (ValueSource::CostBasis, invested),
    ];
    for (source, value) in chain {
        if let Some(v) = value {
            return (Some(v), Some(source));
        }
    }
    (None, None)
}
