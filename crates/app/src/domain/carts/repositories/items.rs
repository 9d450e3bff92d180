//! Cart Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    amounts::{try_get_amount, try_get_quantity},
    domain::{carts::models::CartItem, products::repository::try_bind_amount},
};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const GET_LINE_QUANTITY_SQL: &str = include_str!("../sql/get_line_quantity.sql");
const UPSERT_CART_ITEM_SQL: &str = include_str!("../sql/upsert_cart_item.sql");
const SET_LINE_QUANTITY_SQL: &str = include_str!("../sql/set_line_quantity.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");
const CLEAR_CART_ITEMS_SQL: &str = include_str!("../sql/clear_cart_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: Uuid,
    ) -> Result<Vec<CartItem>, sqlx::Error> {
        query_as::<Postgres, CartItem>(GET_CART_ITEMS_SQL)
            .bind(cart)
            .fetch_all(&mut **tx)
            .await
    }

    /// The quantity already in the cart for a product, 0 when no line exists.
    pub(crate) async fn get_line_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: Uuid,
        product: Uuid,
    ) -> Result<u32, sqlx::Error> {
        let quantity: Option<i64> = query_scalar(GET_LINE_QUANTITY_SQL)
            .bind(cart)
            .bind(product)
            .fetch_optional(&mut **tx)
            .await?;

        match quantity {
            None => Ok(0),
            Some(value) => u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(e),
            }),
        }
    }

    /// Inserts a line, or increments the existing line for the same product.
    pub(crate) async fn upsert_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: Uuid,
        product: Uuid,
        quantity: u32,
        unit_price: u64,
    ) -> Result<(), sqlx::Error> {
        query(UPSERT_CART_ITEM_SQL)
            .bind(cart)
            .bind(product)
            .bind(i64::from(quantity))
            .bind(try_bind_amount(unit_price)?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn set_line_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: Uuid,
        product: Uuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_LINE_QUANTITY_SQL)
            .bind(cart)
            .bind(product)
            .bind(i64::from(quantity))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: Uuid,
        product: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(cart)
            .bind(product)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_ITEMS_SQL)
            .bind(cart)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: row.try_get("product_uuid")?,
            product_name: row.try_get("product_name")?,
            product_sku: row.try_get("product_sku")?,
            unit_price: try_get_amount(row, "unit_price")?,
            quantity: try_get_quantity(row, "quantity")?,
        })
    }
}
