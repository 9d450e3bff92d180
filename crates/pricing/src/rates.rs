//! Discount and tax rate newtypes.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from constructing a rate out of its valid range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateError {
    /// Discount percentages must lie in `0..=100`.
    #[error("discount percent {0} is outside 0..=100")]
    DiscountOutOfRange(Decimal),

    /// Tax rates must lie in `0..=1`.
    #[error("tax rate {0} is outside 0..=1")]
    TaxOutOfRange(Decimal),

    /// The value could not be parsed as a decimal number.
    #[error("not a decimal number: {0}")]
    NotANumber(String),
}

/// A percentage discount applied to a cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct DiscountPercent(Decimal);

impl DiscountPercent {
    /// No discount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a discount percentage, validating the `0..=100` range.
    ///
    /// # Errors
    ///
    /// Returns [`RateError::DiscountOutOfRange`] outside the valid range.
    pub fn new(percent: Decimal) -> Result<Self, RateError> {
        if percent < Decimal::ZERO || percent > Decimal::from(100) {
            return Err(RateError::DiscountOutOfRange(percent));
        }

        Ok(Self(percent))
    }

    /// The percentage as a decimal in `0..=100`.
    #[must_use]
    pub fn as_percent(self) -> Decimal {
        self.0
    }

    /// The multiplier form, `percent / 100`.
    #[must_use]
    pub fn as_fraction(self) -> Decimal {
        self.0 / Decimal::from(100)
    }
}

impl TryFrom<Decimal> for DiscountPercent {
    type Error = RateError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DiscountPercent> for Decimal {
    fn from(value: DiscountPercent) -> Self {
        value.0
    }
}

/// A fixed tax rate, e.g. `0.15` for 15%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// A zero tax rate.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a tax rate, validating the `0..=1` range.
    ///
    /// # Errors
    ///
    /// Returns [`RateError::TaxOutOfRange`] outside the valid range.
    pub fn new(rate: Decimal) -> Result<Self, RateError> {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(RateError::TaxOutOfRange(rate));
        }

        Ok(Self(rate))
    }

    /// The rate as a decimal fraction in `0..=1`.
    #[must_use]
    pub fn as_fraction(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for TaxRate {
    type Error = RateError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaxRate> for Decimal {
    fn from(value: TaxRate) -> Self {
        value.0
    }
}

impl FromStr for TaxRate {
    type Err = RateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rate = Decimal::from_str(s).map_err(|_ignored| RateError::NotANumber(s.to_string()))?;

        Self::new(rate)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn discount_accepts_bounds() -> TestResult {
        DiscountPercent::new(Decimal::ZERO)?;
        DiscountPercent::new(Decimal::from(100))?;

        Ok(())
    }

    #[test]
    fn discount_rejects_out_of_range() {
        assert!(DiscountPercent::new(Decimal::from(-1)).is_err());
        assert!(DiscountPercent::new(Decimal::from(101)).is_err());
    }

    #[test]
    fn discount_fraction() -> TestResult {
        let ten = DiscountPercent::new(Decimal::from(10))?;

        assert_eq!(ten.as_fraction(), Decimal::new(1, 1));

        Ok(())
    }

    #[test]
    fn tax_rate_parses_from_str() -> TestResult {
        let rate: TaxRate = "0.15".parse()?;

        assert_eq!(rate.as_fraction(), Decimal::new(15, 2));

        Ok(())
    }

    #[test]
    fn tax_rate_rejects_out_of_range() {
        assert!("1.5".parse::<TaxRate>().is_err());
        assert!("-0.1".parse::<TaxRate>().is_err());
        assert!("fifteen".parse::<TaxRate>().is_err());
    }
}
