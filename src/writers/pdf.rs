//! Paginated-document output: a bordered grid of the projected columns.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::*;

use crate::error::WriteError;
use crate::models::ProjectedTable;

const TITLE: &str = "Consolidated Holdings";

const PAGE_WIDTH: f32 = 210.0; // A4
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const ROW_HEIGHT: f32 = 7.0;
const BOTTOM_LIMIT: f32 = 25.0;

pub fn write(table: &ProjectedTable, path: &Path) -> Result<(), WriteError> {
    let (doc, page1, layer1) =
        PdfDocument::new(TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| WriteError::Pdf(e.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| WriteError::Pdf(e.to_string()))?;

    let cols = table.columns.len().max(1);
    let col_width = (PAGE_WIDTH - 2.0 * MARGIN) / cols as f32;
    let date_str = chrono::Local::now().format("%Y-%m-%d").to_string();

    let mut layer = doc.get_page(page1).get_layer(layer1);
    let mut pages = 1;

    // Title block on the first page only
    layer.use_text(TITLE, 18.0, Mm(MARGIN), Mm(277.0), &font_bold);
    layer.use_text(
        format!("Generated {}", date_str),
        10.0,
        Mm(MARGIN),
        Mm(267.0),
        &font,
    );
    footer(&layer, &font, &date_str);

    let mut y = 250.0_f32;
    let mut page_top = y + 5.0;
    begin_table(&layer, &font_bold, &table.columns, col_width, y);
    y -= ROW_HEIGHT;

    for row in &table.rows {
        if y < BOTTOM_LIMIT {
            side_borders(&layer, cols, col_width, page_top, y + ROW_HEIGHT - 2.0);
            let (page, page_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            layer = doc.get_page(page).get_layer(page_layer);
            pages += 1;
            footer(&layer, &font, &date_str);
            y = 270.0;
            page_top = y + 5.0;
            begin_table(&layer, &font_bold, &table.columns, col_width, y);
            y -= ROW_HEIGHT;
        }

        for (idx, cell) in row.iter().enumerate() {
            layer.use_text(
                cell.display(),
                9.0,
                Mm(MARGIN + idx as f32 * col_width + 2.0),
                Mm(y),
                &font,
            );
        }
        rule(&layer, MARGIN, y - 2.0, PAGE_WIDTH - MARGIN, y - 2.0);
        y -= ROW_HEIGHT;
    }

    side_borders(&layer, cols, col_width, page_top, y + ROW_HEIGHT - 2.0);
    log::debug!("{}: {} page(s)", path.display(), pages);

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| WriteError::Pdf(e.to_string()))?;
    Ok(())
}

/// Top border, bold header row, rule under the header.
fn begin_table(
    layer: &PdfLayerReference,
    font_bold: &IndirectFontRef,
    columns: &[String],
    col_width: f32,
    y: f32,
) {
    rule(layer, MARGIN, y + 5.0, PAGE_WIDTH - MARGIN, y + 5.0);
    for (idx, name) in columns.iter().enumerate() {
        layer.use_text(
            name,
            10.0,
            Mm(MARGIN + idx as f32 * col_width + 2.0),
            Mm(y),
            font_bold,
        );
    }
    rule(layer, MARGIN, y - 2.0, PAGE_WIDTH - MARGIN, y - 2.0);
}

/// Vertical lines closing the grid on one page.
fn side_borders(layer: &PdfLayerReference, cols: usize, col_width: f32, top: f32, bottom: f32) {
    for idx in 0..=cols {
        let x = MARGIN + idx as f32 * col_width;
        rule(layer, x, top, x, bottom);
    }
}

fn rule(layer: &PdfLayerReference, x1: f32, y1: f32, x2: f32, y2: f32) {
    let line = Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y1)), false),
            (Point::new(Mm(x2), Mm(y2)), false),
        ],
        is_closed: false,
    };
    layer.add_line(line);
}

fn footer(layer: &PdfLayerReference, font: &IndirectFontRef, date_str: &str) {
    layer.use_text(
        format!("Generated with Portfolio Merge - {}", date_str),
        8.0,
        Mm(MARGIN),
        Mm(15.0),
        font,
    );
}
