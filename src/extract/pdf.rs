//! Paginated-document extraction.
//!
//! pdf-extract yields plain text; columns are recovered by splitting each
//! line on runs of two or more spaces, which is how the tabular statement
//! layouts we ingest render their grids. Wrapped header lines are folded
//! back into the header cells by character position before the
//! known-broken-header repairs run.

use std::path::Path;

use super::repair::repair_header;
use super::{source_name, RawCellGrid};
use crate::error::ExtractError;

/// PDF magic bytes
const PDF_MAGIC: &[u8] = b"%PDF";

/// Extract one grid per page that looks tabular.
pub fn extract(path: &Path) -> Result<Vec<RawCellGrid>, ExtractError> {
    let bytes = std::fs::read(path)?;
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(ExtractError::Pdf("missing PDF header".to_string()));
    }
    let text = pdf_extract::extract_text_from_mem(&bytes)
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;
    Ok(grids_from_text(&text, &source_name(path)))
}

/// Split extracted text into per-page grids. Public so the grid layout
/// heuristics stay testable without a PDF on disk.
pub fn grids_from_text(text: &str, source: &str) -> Vec<RawCellGrid> {
    text.split('\u{c}')
        .enumerate()
        .filter_map(|(idx, page)| {
            grid_from_page(page).map(|cells| RawCellGrid {
                source: format!("{}:page{}", source, idx + 1),
                cells,
            })
        })
        .collect()
}

fn grid_from_page(page: &str) -> Option<Vec<Vec<String>>> {
    let lines: Vec<&str> = page.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 2 {
        return None;
    }

    let mut header_tokens = tokens_with_spans(lines[0]);
    let mut data_start = 1;
    if lines.len() >= 3 && is_header_continuation(&header_tokens, lines[1]) {
        merge_continuation(&mut header_tokens, tokens_with_spans(lines[1]));
        data_start = 2;
    }

    let header: Vec<String> = header_tokens.into_iter().map(|(_, cell)| cell).collect();
    let header = repair_header(&header);

    // A single-column "table" is prose, not tabular content.
    if header.len() < 2 {
        return None;
    }

    let mut rows = vec![header];
    for line in &lines[data_start..] {
        rows.push(
            tokens_with_spans(line)
                .into_iter()
                .map(|(_, cell)| cell)
                .collect(),
        );
    }
    if rows.len() < 2 {
        return None;
    }
    Some(rows)
}

/// Header cells wrapped onto a second physical line come back from text
/// extraction as a short, digit-free line of fragments sitting roughly
/// under their columns.
fn is_header_continuation(header: &[(usize, String)], line: &str) -> bool {
    let tokens = tokens_with_spans(line);
    !tokens.is_empty()
        && tokens.len() < header.len()
        && !tokens
            .iter()
            .any(|(_, t)| t.chars().any(|c| c.is_ascii_digit()))
}

/// Fold continuation fragments into the header cell whose column start is
/// nearest, joined with a newline so repair signatures see the full
/// column titles. Alignment is best-effort; a matching repair replaces
/// the row wholesale anyway.
fn merge_continuation(header: &mut [(usize, String)], continuation: Vec<(usize, String)>) {
    for (pos, part) in continuation {
        if let Some((_, cell)) = header
            .iter_mut()
            .min_by_key(|(start, _)| start.abs_diff(pos))
        {
            cell.push('\n');
            cell.push_str(&part);
        }
    }
}

/// Split a line into (column start, cell text) on runs of two or more
/// whitespace characters; single spaces stay inside a cell.
fn tokens_with_spans(line: &str) -> Vec<(usize, String)> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut start = 0;
    let mut gap = 0;
    for (idx, ch) in line.char_indices() {
        if ch.is_whitespace() {
            gap += 1;
            continue;
        }
        if current.is_empty() {
            start = idx;
        } else if gap == 1 {
            current.push(' ');
        } else if gap >= 2 {
            tokens.push((start, std::mem::take(&mut current)));
            start = idx;
        }
        gap = 0;
        current.push(ch);
    }
    if !current.is_empty() {
        tokens.push((start, current));
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    const VESTED_PAGE: &str = "\
Ticker  Company    Total Shares  Average Cost  Current Price  Current Value  Invested      Unrealized  Unrealized  Portfolio   Asset Class
        Name       Held          (USD)         (USD)          (USD)          Amount (USD)  Gain (USD)  Gain (%)    Weight (%)
AAPL    Apple Inc  10            100           150            1500           1000          500         50          40          Equity
MSFT    Microsoft  5             250           300            1500           1250          250         20          40          Equity";

    #[test]
    fn test_tokens_with_spans() {
        let tokens = tokens_with_spans("AAPL    Apple Inc  10");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0], (0, "AAPL".to_string()));
        assert_eq!(tokens[1].1, "Apple Inc");
        assert_eq!(tokens[2].1, "10");
    }

    #[test]
    fn test_vested_page_header_is_repaired() {
        let grids = grids_from_text(VESTED_PAGE, "statement.pdf");
        assert_eq!(grids.len(), 1);
        let grid = &grids[0];
        assert_eq!(grid.source, "statement.pdf:page1");
        assert_eq!(grid.header().len(), 11);
        assert_eq!(grid.header()[2], "Total Shares Held");
        assert_eq!(grid.header()[3], "Average Cost (USD)");
        assert_eq!(grid.data_rows().len(), 2);
        assert_eq!(grid.data_rows()[0][0], "AAPL");
        assert_eq!(grid.data_rows()[0][2], "10");
    }

    #[test]
    fn test_plain_table_page() {
        let page = "Symbol  Shares  Cost\nAAPL  10  100\nMSFT  5  250\n";
        let grids = grids_from_text(page, "plain.pdf");
        assert_eq!(grids.len(), 1);
        assert_eq!(grids[0].header(), &["Symbol", "Shares", "Cost"]);
        assert_eq!(grids[0].data_rows().len(), 2);
    }

    #[test]
    fn test_prose_page_yields_no_grid() {
        let page = "Statement of holdings\nprepared for account 123\n";
        // Each line is a single column, so the page is not tabular.
        assert!(grids_from_text(page, "prose.pdf").is_empty());
    }

    #[test]
    fn test_multi_page_split() {
        let text = format!("{}\u{c}Symbol  Shares\nTSLA  3\n", VESTED_PAGE);
        let grids = grids_from_text(&text, "two.pdf");
        assert_eq!(grids.len(), 2);
        assert_eq!(grids[1].source, "two.pdf:page2");
        assert_eq!(grids[1].data_rows()[0], vec!["TSLA", "3"]);
    }
}
