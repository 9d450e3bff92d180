//! PDF report rendering.
//!
//! A plain one-column-per-field text layout on A4 pages. Reports are small
//! operational documents, not typeset artifacts.

use printpdf::{BuiltinFont, Mm, PdfDocument};
use salvo::prelude::StatusError;

use crate::extensions::*;

use super::ReportTable;

const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const MARGIN_MM: f64 = 14.0;
const LINE_HEIGHT_MM: f64 = 6.0;

pub(super) fn render(table: &ReportTable) -> Result<Vec<u8>, StatusError> {
    let (doc, page, layer) = PdfDocument::new(
        &table.title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "report",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .or_500("failed to load pdf font")?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .or_500("failed to load pdf font")?;

    let mut layer = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    layer.use_text(&table.title, 14.0, Mm(MARGIN_MM), Mm(y), &bold);
    y -= LINE_HEIGHT_MM * 2.0;

    layer.use_text(table.headers.join("  |  "), 10.0, Mm(MARGIN_MM), Mm(y), &bold);

    for row in &table.rows {
        y -= LINE_HEIGHT_MM;

        if y < MARGIN_MM {
            let (page, new_layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "report");

            layer = doc.get_page(page).get_layer(new_layer);
            y = PAGE_HEIGHT_MM - MARGIN_MM;
        }

        layer.use_text(row.join("  |  "), 10.0, Mm(MARGIN_MM), Mm(y), &font);
    }

    doc.save_to_bytes().or_500("failed to serialize pdf export")
}
