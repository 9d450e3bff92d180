//! Minor-unit amount decoding shared by the repositories.

use sqlx::{Row, postgres::PgRow};

/// Reads a `BIGINT` minor-unit amount column as `u64`.
///
/// The schema constrains monetary columns to be non-negative, so a negative
/// value here is a decode error, not a domain state.
pub(crate) fn try_get_amount(row: &PgRow, column: &str) -> Result<u64, sqlx::Error> {
    let value: i64 = row.try_get(column)?;

    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

/// Reads a `BIGINT` quantity column as `u32`.
pub(crate) fn try_get_quantity(row: &PgRow, column: &str) -> Result<u32, sqlx::Error> {
    let value: i64 = row.try_get(column)?;

    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
