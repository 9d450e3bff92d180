//! Spreadsheet report rendering.

use rust_xlsxwriter::{Format, Workbook};
use salvo::prelude::StatusError;

use crate::extensions::*;

use super::ReportTable;

pub(super) fn render(table: &ReportTable) -> Result<Vec<u8>, StatusError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let bold = Format::new().set_bold();

    for (column, header) in table.headers.iter().enumerate() {
        let column = u16::try_from(column).or_500("too many report columns")?;

        sheet
            .write_with_format(0, column, header, &bold)
            .or_500("failed to write spreadsheet header")?;
    }

    for (row, cells) in table.rows.iter().enumerate() {
        let row = u32::try_from(row)
            .ok()
            .and_then(|row| row.checked_add(1))
            .ok_or_else(StatusError::internal_server_error)?;

        for (column, cell) in cells.iter().enumerate() {
            let column = u16::try_from(column).or_500("too many report columns")?;

            sheet
                .write(row, column, cell)
                .or_500("failed to write spreadsheet cell")?;
        }
    }

    workbook
        .save_to_buffer()
        .or_500("failed to serialize spreadsheet export")
}
