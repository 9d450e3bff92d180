//! Reports Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    amounts::{try_get_amount, try_get_quantity},
    domain::reports::models::SupplierPerformanceRow,
};

const SALES_SUMMARY_SQL: &str = include_str!("sql/sales_summary.sql");
const PURCHASE_TOTAL_SQL: &str = include_str!("sql/purchase_total.sql");
const INVENTORY_TURNOVER_SQL: &str = include_str!("sql/inventory_turnover.sql");
const SUPPLIER_PERFORMANCE_SQL: &str = include_str!("sql/supplier_performance.sql");

/// Raw sales aggregates before derived figures.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SalesTotals {
    pub order_count: u64,
    pub gross_revenue: u64,
    pub discount_total: u64,
    pub tax_total: u64,
}

/// Raw per-product movement before derived figures.
#[derive(Debug, Clone)]
pub(crate) struct TurnoverRecord {
    pub product_uuid: Uuid,
    pub product_name: String,
    pub product_sku: String,
    pub price: u64,
    pub stock_quantity: u32,
    pub units_sold: u64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReportsRepository;

impl PgReportsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn sales_totals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<SalesTotals, sqlx::Error> {
        query_as::<Postgres, SalesTotals>(SALES_SUMMARY_SQL)
            .bind(SqlxTimestamp::from(start))
            .bind(SqlxTimestamp::from(end))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn purchase_total(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let row = query_as::<Postgres, PurchaseTotal>(PURCHASE_TOTAL_SQL)
            .bind(SqlxTimestamp::from(start))
            .bind(SqlxTimestamp::from(end))
            .fetch_one(&mut **tx)
            .await?;

        Ok(row.0)
    }

    pub(crate) async fn inventory_turnover(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<TurnoverRecord>, sqlx::Error> {
        query_as::<Postgres, TurnoverRecord>(INVENTORY_TURNOVER_SQL)
            .bind(SqlxTimestamp::from(start))
            .bind(SqlxTimestamp::from(end))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn supplier_performance(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<SupplierPerformanceRow>, sqlx::Error> {
        query_as::<Postgres, SupplierPerformanceRow>(SUPPLIER_PERFORMANCE_SQL)
            .bind(SqlxTimestamp::from(start))
            .bind(SqlxTimestamp::from(end))
            .fetch_all(&mut **tx)
            .await
    }
}

struct PurchaseTotal(u64);

impl<'r> FromRow<'r, PgRow> for PurchaseTotal {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self(try_get_amount(row, "total_purchases")?))
    }
}

impl<'r> FromRow<'r, PgRow> for SalesTotals {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_count: try_get_amount(row, "order_count")?,
            gross_revenue: try_get_amount(row, "gross_revenue")?,
            discount_total: try_get_amount(row, "discount_total")?,
            tax_total: try_get_amount(row, "tax_total")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for TurnoverRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: row.try_get("uuid")?,
            product_name: row.try_get("name")?,
            product_sku: row.try_get("sku")?,
            price: try_get_amount(row, "price")?,
            stock_quantity: try_get_quantity(row, "stock_quantity")?,
            units_sold: try_get_amount(row, "units_sold")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for SupplierPerformanceRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            supplier_uuid: row.try_get("uuid")?,
            supplier_name: row.try_get("name")?,
            order_count: try_get_amount(row, "order_count")?,
            total_spent: try_get_amount(row, "total_spent")?,
            received_count: try_get_amount(row, "received_count")?,
        })
    }
}
