//! Order response payloads, shared by the order lookup and checkout handlers.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tillpoint_app::domain::orders::models::{Order, OrderItem};

/// Order Response
///
/// The receipt payload for a committed sale.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// Human order number printed on the receipt
    pub order_number: String,

    /// Customer name, or the walk-in placeholder
    pub customer_name: String,

    /// Customer phone, empty for walk-ins
    pub customer_phone: String,

    /// Customer address, empty for walk-ins
    pub customer_address: String,

    /// Payment method captured at the till
    pub payment_method: String,

    /// Sum of line totals, in minor units
    pub subtotal: u64,

    /// Discount taken off the subtotal, in minor units
    pub discount_amount: u64,

    /// Tax charged on the discounted subtotal, in minor units
    pub tax_amount: u64,

    /// Amount due, in minor units
    pub total: u64,

    /// The sold lines with their sale-time snapshots
    pub items: Vec<OrderItemResponse>,

    /// The date and time the sale was committed
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid,
            order_number: order.order_number,
            customer_name: order.customer_name,
            customer_phone: order.customer_phone,
            customer_address: order.customer_address,
            payment_method: order.payment_method,
            subtotal: order.subtotal,
            discount_amount: order.discount_amount,
            tax_amount: order.tax_amount,
            total: order.total,
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            created_at: order.created_at.to_string(),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    /// The product that was sold
    pub product_uuid: Uuid,

    /// Product name snapshot at sale time
    pub product_name: String,

    /// Product SKU snapshot at sale time
    pub product_sku: String,

    /// Units sold on this line
    pub quantity: u32,

    /// Unit price at sale time, in minor units
    pub unit_price: u64,

    /// Line total, in minor units
    pub line_total: u64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            product_uuid: item.product_uuid,
            line_total: item.unit_price.saturating_mul(u64::from(item.quantity)),
            product_name: item.product_name,
            product_sku: item.product_sku,
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}
