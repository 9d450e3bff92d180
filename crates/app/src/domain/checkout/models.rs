//! Checkout Models

use tillpoint_pricing::DiscountPercent;
use uuid::Uuid;

/// The customer identity the register captured at the till, if any.
///
/// Empty fields fall through the resolution chain (phone, then name) to the
/// default walk-in identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// Name given to sales with no identified customer.
pub const WALK_IN_NAME: &str = "Walk-in Customer";

impl CustomerDetails {
    /// Whether the captured name is absent or just the walk-in placeholder.
    #[must_use]
    pub fn is_walk_in_name(&self) -> bool {
        self.name.trim().is_empty() || self.name.trim().eq_ignore_ascii_case(WALK_IN_NAME)
    }
}

/// One checkout attempt for a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub payment_method: String,
    pub discount: DiscountPercent,
    pub customer: CustomerDetails,
}

/// A persisted customer row, resolved or created during checkout.
#[derive(Debug, Clone)]
pub(crate) struct CustomerRecord {
    pub uuid: Uuid,
    pub name: String,
    pub phone: String,
    pub address: String,
}
