//! CSV report rendering.

use salvo::prelude::StatusError;

use crate::extensions::*;

use super::ReportTable;

pub(super) fn render(table: &ReportTable) -> Result<Vec<u8>, StatusError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(&table.headers)
        .or_500("failed to render csv header")?;

    for row in &table.rows {
        writer.write_record(row).or_500("failed to render csv row")?;
    }

    writer.into_inner().or_500("failed to flush csv export")
}
