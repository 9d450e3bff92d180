//! Order Models

use jiff::Timestamp;
use uuid::Uuid;

/// Order Model
///
/// A committed sale. Immutable after checkout: reports read orders, nothing
/// mutates them. Doubles as the receipt payload.
#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: Uuid,
    /// Human order number, `SO<YYYYMMDDHHMMSS><suffix>`.
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub payment_method: String,
    pub subtotal: u64,
    pub discount_amount: u64,
    pub tax_amount: u64,
    pub total: u64,
    pub items: Vec<OrderItem>,
    pub created_at: Timestamp,
}

/// OrderItem Model
///
/// Product name and SKU are snapshots taken at sale time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub product_uuid: Uuid,
    pub product_name: String,
    pub product_sku: String,
    pub quantity: u32,
    pub unit_price: u64,
}
