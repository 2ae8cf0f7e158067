//! Projection of merged holdings into the requested output shape.

use chrono::NaiveDate;

use crate::models::{Cell, ExportFormat, MergedHolding, ProjectedTable};

/// Select and order canonical fields for the requested export format.
/// Never mutates the holdings; returns a new read-only view.
pub fn project(
    holdings: &[MergedHolding],
    format: ExportFormat,
    as_of: NaiveDate,
) -> ProjectedTable {
    match format {
        ExportFormat::SeekingAlpha => {
            let date = as_of.format("%Y-%m-%d").to_string();
            ProjectedTable {
                columns: to_columns(&["symbol", "quantity", "cost", "date"]),
                rows: holdings
                    .iter()
                    .map(|h| {
                        vec![
                            Cell::Text(h.symbol.clone()),
                            Cell::from(h.quantity),
                            Cell::from(h.cost),
                            Cell::Text(date.clone()),
                        ]
                    })
                    .collect(),
            }
        }
        ExportFormat::Original => {
            let with_value = holdings.iter().any(|h| h.value.is_some());
            let mut columns = to_columns(&["symbol", "quantity", "cost", "invested"]);
            if with_value {
                columns.push("value".to_string());
            }
            ProjectedTable {
                columns,
                rows: holdings
                    .iter()
                    .map(|h| {
                        let mut row = vec![
                            Cell::Text(h.symbol.clone()),
                            Cell::from(h.quantity),
                            Cell::from(h.cost),
                            Cell::from(h.invested),
                        ];
                        if with_value {
                            row.push(Cell::from(h.value));
                        }
                        row
                    })
                    .collect(),
            }
        }
    }
}

fn to_columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValueSource;

    fn holding(symbol: &str, value: Option<f64>) -> MergedHolding {
        MergedHolding {
            symbol: symbol.to_string(),
            quantity: Some(15.0),
            cost: Some(110.0),
            price: None,
            invested: Some(1650.0),
            value,
            value_source: value.map(|_| ValueSource::CostBasis),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    #[test]
    fn test_seeking_alpha_projection() {
        let table = project(&[holding("AAPL", Some(1650.0))], ExportFormat::SeekingAlpha, date());
        assert_eq!(table.columns, vec!["symbol", "quantity", "cost", "date"]);
        assert_eq!(
            table.rows[0],
            vec![
                Cell::Text("AAPL".into()),
                Cell::Number(15.0),
                Cell::Number(110.0),
                Cell::Text("2026-08-06".into()),
            ]
        );
    }

    #[test]
    fn test_original_projection_appends_value_when_any_present() {
        let holdings = vec![holding("AAPL", Some(1650.0)), holding("MSFT", None)];
        let table = project(&holdings, ExportFormat::Original, date());
        assert_eq!(
            table.columns,
            vec!["symbol", "quantity", "cost", "invested", "value"]
        );
        assert_eq!(table.rows[0].len(), 5);
        assert_eq!(table.rows[1][4], Cell::Empty);
    }

    #[test]
    fn test_original_projection_omits_value_when_none_present() {
        let table = project(&[holding("AAPL", None)], ExportFormat::Original, date());
        assert_eq!(table.columns, vec!["symbol", "quantity", "cost", "invested"]);
        assert_eq!(table.rows[0].len(), 4);
    }

    #[test]
    fn test_date_is_identical_across_rows() {
        let holdings = vec![holding("AAPL", None), holding("MSFT", None)];
        let table = project(&holdings, ExportFormat::SeekingAlpha, date());
        assert_eq!(table.rows[0][3], table.rows[1][3]);
    }
}
