//! Purchasing Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    amounts::try_get_amount,
    domain::{
        products::repository::try_bind_amount,
        purchasing::models::{
            NewPurchaseOrder, NewSupplier, PurchaseOrder, PurchaseStatus, Supplier,
        },
    },
};

const CREATE_SUPPLIER_SQL: &str = include_str!("sql/create_supplier.sql");
const LIST_SUPPLIERS_SQL: &str = include_str!("sql/list_suppliers.sql");
const RECORD_PURCHASE_SQL: &str = include_str!("sql/record_purchase.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPurchasingRepository;

impl PgPurchasingRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_supplier(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        supplier: NewSupplier,
    ) -> Result<Supplier, sqlx::Error> {
        query_as::<Postgres, Supplier>(CREATE_SUPPLIER_SQL)
            .bind(supplier.uuid)
            .bind(&supplier.name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_suppliers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Supplier>, sqlx::Error> {
        query_as::<Postgres, Supplier>(LIST_SUPPLIERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn record_purchase(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        purchase: NewPurchaseOrder,
    ) -> Result<PurchaseOrder, sqlx::Error> {
        query_as::<Postgres, PurchaseOrder>(RECORD_PURCHASE_SQL)
            .bind(purchase.uuid)
            .bind(purchase.supplier_uuid)
            .bind(purchase.status.as_str())
            .bind(try_bind_amount(purchase.total_amount)?)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Supplier {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for PurchaseOrder {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<PurchaseStatus>()
            .map_err(|message| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: message.into(),
            })?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            supplier_uuid: row.try_get("supplier_uuid")?,
            status,
            total_amount: try_get_amount(row, "total_amount")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
