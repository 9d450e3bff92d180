//! Checkout service.

use std::collections::HashMap;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tillpoint_pricing::{TaxRate, compute_totals};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        carts::repositories::{PgCartItemsRepository, PgCartsRepository},
        checkout::{
            errors::CheckoutServiceError,
            models::{CheckoutRequest, CustomerDetails, CustomerRecord, WALK_IN_NAME},
            repository::PgCheckoutRepository,
        },
        orders::{
            models::{Order, OrderItem},
            repository::{OrderRow, PgOrdersRepository},
        },
        products::repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCheckoutService {
    db: Db,
    tax_rate: TaxRate,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    orders_repository: PgOrdersRepository,
    products_repository: PgProductsRepository,
    checkout_repository: PgCheckoutRepository,
}

impl PgCheckoutService {
    #[must_use]
    pub fn new(db: Db, tax_rate: TaxRate) -> Self {
        Self {
            db,
            tax_rate,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            orders_repository: PgOrdersRepository::new(),
            products_repository: PgProductsRepository::new(),
            checkout_repository: PgCheckoutRepository::new(),
        }
    }

    /// Resolves the captured details to a customer row: by phone first, then
    /// by name, falling back to the shared walk-in identity. Creates the row
    /// when no match exists.
    async fn resolve_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        details: &CustomerDetails,
    ) -> Result<CustomerRecord, CheckoutServiceError> {
        let phone = details.phone.trim();
        let name = details.name.trim();

        if !phone.is_empty() {
            if let Some(found) = self
                .checkout_repository
                .find_customer_by_phone(tx, phone)
                .await?
            {
                return Ok(found);
            }
        }

        let resolved_name = if details.is_walk_in_name() {
            WALK_IN_NAME
        } else {
            name
        };

        if phone.is_empty() {
            if let Some(found) = self
                .checkout_repository
                .find_customer_by_name(tx, resolved_name)
                .await?
            {
                return Ok(found);
            }
        }

        let created = self
            .checkout_repository
            .insert_customer(
                tx,
                Uuid::now_v7(),
                resolved_name,
                phone,
                details.address.trim(),
            )
            .await?;

        Ok(created)
    }
}

/// Builds the human order number from the sale instant and the order uuid.
fn order_number(uuid: Uuid, at: jiff::Timestamp) -> String {
    let stamp = at.strftime("%Y%m%d%H%M%S");
    let hex = uuid.simple().to_string();

    format!("SO{stamp}{}", &hex[26..])
}

#[async_trait]
impl CheckoutService for PgCheckoutService {
    async fn checkout(
        &self,
        cart: Uuid,
        request: CheckoutRequest,
    ) -> Result<Order, CheckoutServiceError> {
        if request.payment_method.trim().is_empty() {
            return Err(CheckoutServiceError::MissingPaymentMethod);
        }

        let mut tx = self.db.begin().await?;

        self.carts_repository.get_cart(&mut tx, cart).await?;

        let items = self.items_repository.get_cart_items(&mut tx, cart).await?;

        if items.is_empty() {
            return Err(CheckoutServiceError::EmptyCart);
        }

        // Lock the cart's product rows for the remainder of the transaction
        // and recheck stock under the lock. Add-time checks are advisory
        // only; this is the authoritative one.
        let mut product_uuids: Vec<Uuid> = items.iter().map(|item| item.product_uuid).collect();
        product_uuids.sort_unstable();

        let locked = self
            .checkout_repository
            .lock_products(&mut tx, &product_uuids)
            .await?;

        let stock_by_uuid: HashMap<Uuid, u32> = locked
            .iter()
            .map(|product| (product.uuid, product.stock_quantity))
            .collect();

        for item in &items {
            let available = stock_by_uuid.get(&item.product_uuid).copied().unwrap_or(0);

            if item.quantity > available {
                return Err(CheckoutServiceError::InsufficientStock {
                    product: item.product_name.clone(),
                    available,
                });
            }
        }

        let lines = items
            .iter()
            .map(|item| tillpoint_pricing::LineAmount::new(item.unit_price, item.quantity));
        let totals = compute_totals(lines, request.discount, self.tax_rate)?;

        let customer = self.resolve_customer(&mut tx, &request.customer).await?;

        let uuid = Uuid::now_v7();
        let number = order_number(uuid, jiff::Timestamp::now());

        let mut order = self
            .orders_repository
            .insert_order(
                &mut tx,
                OrderRow {
                    uuid,
                    order_number: &number,
                    customer_uuid: customer.uuid,
                    customer_name: &customer.name,
                    customer_phone: &customer.phone,
                    customer_address: &customer.address,
                    payment_method: request.payment_method.trim(),
                    subtotal: totals.subtotal,
                    discount_amount: totals.discount_amount,
                    tax_amount: totals.tax_amount,
                    total: totals.total,
                },
            )
            .await?;

        for item in &items {
            let order_item = OrderItem {
                product_uuid: item.product_uuid,
                product_name: item.product_name.clone(),
                product_sku: item.product_sku.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
            };

            self.orders_repository
                .insert_order_item(&mut tx, uuid, &order_item)
                .await?;

            self.checkout_repository
                .decrement_stock(&mut tx, item.product_uuid, item.quantity)
                .await?;

            self.products_repository
                .insert_stock_movement(&mut tx, item.product_uuid, "OUT", item.quantity, "sale", &number)
                .await?;

            order.items.push(order_item);
        }

        self.carts_repository.delete_cart(&mut tx, cart).await?;

        tx.commit().await.map_err(CheckoutServiceError::Commit)?;

        tracing::info!(
            order = %order.order_number,
            total = order.total,
            "checkout committed"
        );

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Converts a cart into a committed order in one transaction: rechecks
    /// stock under row locks, prices the cart, decrements stock, writes the
    /// order and its movements, and deletes the cart. Any failure leaves
    /// stock and cart untouched.
    async fn checkout(
        &self,
        cart: Uuid,
        request: CheckoutRequest,
    ) -> Result<Order, CheckoutServiceError>;
}
