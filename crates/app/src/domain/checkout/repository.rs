//! Checkout Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{checkout::models::CustomerRecord, products::models::Product};

const LOCK_PRODUCTS_SQL: &str = include_str!("sql/lock_products.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");
const FIND_CUSTOMER_BY_PHONE_SQL: &str = include_str!("sql/find_customer_by_phone.sql");
const FIND_CUSTOMER_BY_NAME_SQL: &str = include_str!("sql/find_customer_by_name.sql");
const INSERT_CUSTOMER_SQL: &str = include_str!("sql/insert_customer.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCheckoutRepository;

impl PgCheckoutRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Locks the given product rows for the remainder of the transaction.
    ///
    /// Rows are locked in ascending uuid order so concurrent checkouts that
    /// share products acquire locks in the same order.
    pub(crate) async fn lock_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[Uuid],
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(LOCK_PRODUCTS_SQL)
            .bind(products)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: Uuid,
        quantity: u32,
    ) -> Result<(), sqlx::Error> {
        query(DECREMENT_STOCK_SQL)
            .bind(product)
            .bind(i64::from(quantity))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn find_customer_by_phone(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        phone: &str,
    ) -> Result<Option<CustomerRecord>, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(FIND_CUSTOMER_BY_PHONE_SQL)
            .bind(phone)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_customer_by_name(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<Option<CustomerRecord>, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(FIND_CUSTOMER_BY_NAME_SQL)
            .bind(name)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn insert_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: Uuid,
        name: &str,
        phone: &str,
        address: &str,
    ) -> Result<CustomerRecord, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(INSERT_CUSTOMER_SQL)
            .bind(uuid)
            .bind(name)
            .bind(phone)
            .bind(address)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CustomerRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            phone: row.try_get("phone")?,
            address: row.try_get("address")?,
        })
    }
}
