//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    amounts::{try_get_amount, try_get_quantity},
    domain::products::models::{NewProduct, Product, ProductUpdate},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const SEARCH_PRODUCTS_SQL: &str = include_str!("sql/search_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const FIND_BY_SKU_SQL: &str = include_str!("sql/find_by_sku.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const RESTOCK_PRODUCT_SQL: &str = include_str!("sql/restock_product.sql");
const INSERT_STOCK_MOVEMENT_SQL: &str = include_str!("sql/insert_stock_movement.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn search_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        term: &str,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(SEARCH_PRODUCTS_SQL)
            .bind(escape_like(term))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: Uuid,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(product)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_by_sku(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sku: &str,
    ) -> Result<Option<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(FIND_BY_SKU_SQL)
            .bind(sku)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(CREATE_PRODUCT_SQL)
            .bind(product.uuid)
            .bind(&product.name)
            .bind(&product.sku)
            .bind(try_bind_amount(product.price)?)
            .bind(i64::from(product.stock_quantity))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(UPDATE_PRODUCT_SQL)
            .bind(product)
            .bind(&update.name)
            .bind(&update.sku)
            .bind(try_bind_amount(update.price)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn restock_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: Uuid,
        quantity: u32,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(RESTOCK_PRODUCT_SQL)
            .bind(product)
            .bind(i64::from(quantity))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn insert_stock_movement(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: Uuid,
        direction: &str,
        quantity: u32,
        reason: &str,
        reference: &str,
    ) -> Result<(), sqlx::Error> {
        query(INSERT_STOCK_MOVEMENT_SQL)
            .bind(product)
            .bind(direction)
            .bind(i64::from(quantity))
            .bind(reason)
            .bind(reference)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

/// Converts a minor-unit amount to the `BIGINT` the schema stores.
pub(crate) fn try_bind_amount(amount: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

/// ILIKE treats `%`, `_` and `\` as pattern syntax; a typed or scanned
/// search term is always literal.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            sku: row.try_get("sku")?,
            price: try_get_amount(row, "price")?,
            stock_quantity: try_get_quantity(row, "stock_quantity")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
