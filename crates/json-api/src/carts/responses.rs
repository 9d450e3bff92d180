//! Cart response payloads shared by the cart and cart-item handlers.

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tillpoint_app::domain::carts::models::{Cart, CartItem};
use tillpoint_pricing::{DiscountPercent, TaxRate, Totals, compute_totals};

use crate::extensions::*;

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart; doubles as the POS session key
    pub uuid: Uuid,

    /// The lines of the cart, in insertion order
    pub items: Vec<CartItemResponse>,

    /// Session totals for the cart as priced right now
    pub totals: TotalsResponse,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last touched
    pub updated_at: String,
}

impl CartResponse {
    /// Prices the cart and assembles the response payload.
    pub(crate) fn price(
        cart: Cart,
        discount: DiscountPercent,
        tax_rate: TaxRate,
    ) -> Result<Self, StatusError> {
        let totals = compute_totals(cart.line_amounts(), discount, tax_rate)
            .or_500("failed to price cart")?;

        Ok(Self {
            uuid: cart.uuid,
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            totals: totals.into(),
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        })
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The product on this line
    pub product_uuid: Uuid,

    /// Product name snapshot
    pub product_name: String,

    /// Product SKU snapshot
    pub product_sku: String,

    /// Unit price captured when the line was added, in minor units
    pub unit_price: u64,

    /// Units on this line
    pub quantity: u32,

    /// Line total, in minor units
    pub line_total: u64,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            product_uuid: item.product_uuid,
            line_total: item.unit_price.saturating_mul(u64::from(item.quantity)),
            product_name: item.product_name,
            product_sku: item.product_sku,
            unit_price: item.unit_price,
            quantity: item.quantity,
        }
    }
}

/// Totals Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TotalsResponse {
    /// Sum of line totals, in minor units
    pub subtotal: u64,

    /// Discount taken off the subtotal, in minor units
    pub discount_amount: u64,

    /// Tax charged on the discounted subtotal, in minor units
    pub tax_amount: u64,

    /// Amount due, in minor units
    pub total: u64,
}

impl From<Totals> for TotalsResponse {
    fn from(totals: Totals) -> Self {
        Self {
            subtotal: totals.subtotal,
            discount_amount: totals.discount_amount,
            tax_amount: totals.tax_amount,
            total: totals.total,
        }
    }
}
