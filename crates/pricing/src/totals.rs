//! Cart and order totals.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rates::{DiscountPercent, TaxRate};

/// Errors that can occur while computing totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TotalsError {
    /// A line amount or the subtotal overflowed the minor-unit range.
    #[error("amount overflow while summing line totals")]
    Overflow,
}

/// One priced line: a unit price in minor units and a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineAmount {
    /// Unit price in minor units, as snapshotted when the line was created.
    pub unit_price: u64,

    /// Line quantity, always at least 1.
    pub quantity: u32,
}

impl LineAmount {
    /// Creates a line amount.
    #[must_use]
    pub fn new(unit_price: u64, quantity: u32) -> Self {
        Self {
            unit_price,
            quantity,
        }
    }
}

/// Computed totals, all in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of `unit_price * quantity` over all lines, exact.
    pub subtotal: u64,

    /// Discount applied to the subtotal, rounded half-up to minor units.
    pub discount_amount: u64,

    /// Tax on the discounted subtotal, rounded half-up to minor units.
    pub tax_amount: u64,

    /// `subtotal - discount_amount + tax_amount`, exact over the rounded parts.
    pub total: u64,
}

impl Totals {
    /// Totals of an empty cart.
    pub const ZERO: Self = Self {
        subtotal: 0,
        discount_amount: 0,
        tax_amount: 0,
        total: 0,
    };
}

/// Rounds a decimal minor-unit amount half-up (midpoint away from zero).
fn round_minor(amount: Decimal) -> Result<u64, TotalsError> {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(TotalsError::Overflow)
}

/// Computes subtotal, discount, tax, and grand total for a set of lines.
///
/// Deterministic and side-effect free: the same lines, discount, and tax rate
/// always produce the same totals. Rounding happens exactly twice — once for
/// the discount amount and once for the tax amount — and the grand total is
/// the exact sum of the rounded parts, so
/// `total == subtotal - discount_amount + tax_amount` always holds.
///
/// # Errors
///
/// Returns [`TotalsError::Overflow`] when a line total or the subtotal
/// exceeds the `u64` minor-unit range.
pub fn compute_totals<I>(
    lines: I,
    discount: DiscountPercent,
    tax_rate: TaxRate,
) -> Result<Totals, TotalsError>
where
    I: IntoIterator<Item = LineAmount>,
{
    let subtotal = lines.into_iter().try_fold(0_u64, |acc, line| {
        line.unit_price
            .checked_mul(u64::from(line.quantity))
            .and_then(|line_total| acc.checked_add(line_total))
            .ok_or(TotalsError::Overflow)
    })?;

    let subtotal_dec = Decimal::from(subtotal);

    let discount_amount = round_minor(subtotal_dec * discount.as_fraction())?;

    // The discount never exceeds the subtotal: the fraction is at most 1 and
    // half-up rounding of `subtotal * f` with `f <= 1` cannot pass subtotal.
    let taxable = subtotal - discount_amount;

    let tax_amount = round_minor(Decimal::from(taxable) * tax_rate.as_fraction())?;

    let total = taxable.checked_add(tax_amount).ok_or(TotalsError::Overflow)?;

    Ok(Totals {
        subtotal,
        discount_amount,
        tax_amount,
        total,
    })
}
