//! Report Models

use jiff::{Span, Timestamp, civil::Date, tz::TimeZone};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::reports::errors::ReportsServiceError;

/// Default trailing window when the caller gives only an end date.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// An inclusive calendar date range. Reports cover whole days in UTC: the
/// range `[start, end]` selects rows stamped from start-of-day `start` up to
/// but excluding start-of-day of the day after `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRange {
    pub start: Date,
    pub end: Date,
}

impl ReportRange {
    #[must_use]
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// The default window: the `DEFAULT_WINDOW_DAYS` days ending at `end`.
    #[must_use]
    pub fn trailing(end: Date) -> Self {
        Self {
            start: end.saturating_sub(Span::new().days(DEFAULT_WINDOW_DAYS)),
            end,
        }
    }

    /// The half-open UTC timestamp bounds this range selects.
    pub(crate) fn utc_bounds(self) -> Result<(Timestamp, Timestamp), ReportsServiceError> {
        if self.start > self.end {
            return Err(ReportsServiceError::InvalidRange(format!(
                "start {} is after end {}",
                self.start, self.end
            )));
        }

        let start = self
            .start
            .to_zoned(TimeZone::UTC)
            .map_err(|error| ReportsServiceError::InvalidRange(error.to_string()))?
            .timestamp();
        let end = self
            .end
            .tomorrow()
            .and_then(|day_after| day_after.to_zoned(TimeZone::UTC))
            .map_err(|error| ReportsServiceError::InvalidRange(error.to_string()))?
            .timestamp();

        Ok((start, end))
    }
}

/// Aggregate sales figures for a range. Amounts are minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SalesSummary {
    pub order_count: u64,
    pub gross_revenue: u64,
    pub discount_total: u64,
    pub tax_total: u64,
    /// Gross revenue over order count, floored; zero when no orders.
    pub average_order_value: u64,
}

/// Sales against purchasing spend for a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SalesVsPurchase {
    pub total_sales: u64,
    pub total_purchases: u64,
    /// Sales minus purchases; negative when spend outpaces sales.
    pub gross_margin: i64,
    /// Margin over sales as a percentage, two decimal places. Zero when
    /// there are no sales.
    pub margin_percent: Decimal,
}

/// Per-product movement figures for a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnoverRow {
    pub product_uuid: Uuid,
    pub product_name: String,
    pub product_sku: String,
    pub units_sold: u64,
    pub stock_quantity: u32,
    /// Current stock at current price, minor units.
    pub stock_value: u64,
    /// Units sold over current stock; a zero stock level divides by one so
    /// fully-sold-through products still rank.
    pub turnover: Decimal,
}

/// Per-supplier purchasing figures for a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierPerformanceRow {
    pub supplier_uuid: Uuid,
    pub supplier_name: String,
    pub order_count: u64,
    pub total_spent: u64,
    pub received_count: u64,
}
