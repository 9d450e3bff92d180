//! Cart Models

use jiff::Timestamp;
use tillpoint_pricing::LineAmount;
use uuid::Uuid;

/// Cart Model
///
/// The cart uuid doubles as the POS session key. Lines keep insertion order.
#[derive(Debug, Clone)]
pub struct Cart {
    pub uuid: Uuid,
    pub items: Vec<CartItem>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Cart {
    /// The cart's lines as pricing inputs. Everything the pricing engine
    /// needs is already resident in the lines; no further I/O.
    #[must_use]
    pub fn line_amounts(&self) -> Vec<LineAmount> {
        self.items
            .iter()
            .map(|item| LineAmount::new(item.unit_price, item.quantity))
            .collect()
    }
}

/// New Cart Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCart {
    pub uuid: Uuid,
}

/// CartItem Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub product_uuid: Uuid,
    pub product_name: String,
    pub product_sku: String,
    /// Unit price snapshotted at add time, so session totals stay stable.
    pub unit_price: u64,
    pub quantity: u32,
}
