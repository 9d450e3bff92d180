//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    amounts::{try_get_amount, try_get_quantity},
    domain::orders::models::{Order, OrderItem},
    domain::products::repository::try_bind_amount,
};

const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("sql/get_order_items.sql");
const INSERT_ORDER_SQL: &str = include_str!("sql/insert_order.sql");
const INSERT_ORDER_ITEM_SQL: &str = include_str!("sql/insert_order_item.sql");

/// Column values for a new order row; items are inserted separately.
pub(crate) struct OrderRow<'a> {
    pub uuid: Uuid,
    pub order_number: &'a str,
    pub customer_uuid: Uuid,
    pub customer_name: &'a str,
    pub customer_phone: &'a str,
    pub customer_address: &'a str,
    pub payment_method: &'a str,
    pub subtotal: u64,
    pub discount_amount: u64,
    pub tax_amount: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        query_as::<Postgres, OrderItem>(GET_ORDER_ITEMS_SQL)
            .bind(order)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn insert_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        row: OrderRow<'_>,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(INSERT_ORDER_SQL)
            .bind(row.uuid)
            .bind(row.order_number)
            .bind(row.customer_uuid)
            .bind(row.customer_name)
            .bind(row.customer_phone)
            .bind(row.customer_address)
            .bind(row.payment_method)
            .bind(try_bind_amount(row.subtotal)?)
            .bind(try_bind_amount(row.discount_amount)?)
            .bind(try_bind_amount(row.tax_amount)?)
            .bind(try_bind_amount(row.total)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn insert_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
        item: &OrderItem,
    ) -> Result<(), sqlx::Error> {
        query(INSERT_ORDER_ITEM_SQL)
            .bind(order)
            .bind(item.product_uuid)
            .bind(&item.product_name)
            .bind(&item.product_sku)
            .bind(i64::from(item.quantity))
            .bind(try_bind_amount(item.unit_price)?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            order_number: row.try_get("order_number")?,
            customer_name: row.try_get("customer_name")?,
            customer_phone: row.try_get("customer_phone")?,
            customer_address: row.try_get("customer_address")?,
            payment_method: row.try_get("payment_method")?,
            subtotal: try_get_amount(row, "subtotal")?,
            discount_amount: try_get_amount(row, "discount_amount")?,
            tax_amount: try_get_amount(row, "tax_amount")?,
            total: try_get_amount(row, "total")?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: row.try_get("product_uuid")?,
            product_name: row.try_get("product_name")?,
            product_sku: row.try_get("product_sku")?,
            quantity: try_get_quantity(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
        })
    }
}
