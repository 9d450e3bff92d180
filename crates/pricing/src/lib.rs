//! Pure pricing computations for the POS.
//!
//! Money is represented in integer minor units (pence/cents) end to end;
//! percentage and tax arithmetic happens in [`rust_decimal::Decimal`] and is
//! rounded back to minor units only at the boundary, so repeated
//! recomputation never drifts.

mod rates;
mod totals;

pub use rates::{DiscountPercent, RateError, TaxRate};
pub use totals::{LineAmount, Totals, TotalsError, compute_totals};
