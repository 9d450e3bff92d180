//! Reports service.
//!
//! Read-only aggregation over committed orders, purchases, and inventory.
//! Every metric over an empty range is zero, never an error.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;

use crate::{
    database::Db,
    domain::reports::{
        errors::ReportsServiceError,
        models::{ReportRange, SalesSummary, SalesVsPurchase, SupplierPerformanceRow, TurnoverRow},
        repository::PgReportsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgReportsService {
    db: Db,
    repository: PgReportsRepository,
}

impl PgReportsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReportsRepository::new(),
        }
    }
}

#[async_trait]
impl ReportsService for PgReportsService {
    async fn sales_summary(&self, range: ReportRange) -> Result<SalesSummary, ReportsServiceError> {
        let (start, end) = range.utc_bounds()?;

        let mut tx = self.db.begin().await?;
        let totals = self.repository.sales_totals(&mut tx, start, end).await?;
        tx.commit().await?;

        let average_order_value = if totals.order_count == 0 {
            0
        } else {
            totals.gross_revenue / totals.order_count
        };

        Ok(SalesSummary {
            order_count: totals.order_count,
            gross_revenue: totals.gross_revenue,
            discount_total: totals.discount_total,
            tax_total: totals.tax_total,
            average_order_value,
        })
    }

    async fn sales_vs_purchase(
        &self,
        range: ReportRange,
    ) -> Result<SalesVsPurchase, ReportsServiceError> {
        let (start, end) = range.utc_bounds()?;

        let mut tx = self.db.begin().await?;
        let sales = self.repository.sales_totals(&mut tx, start, end).await?;
        let total_purchases = self.repository.purchase_total(&mut tx, start, end).await?;
        tx.commit().await?;

        let total_sales = sales.gross_revenue;
        let gross_margin = i64::try_from(total_sales).unwrap_or(i64::MAX)
            - i64::try_from(total_purchases).unwrap_or(i64::MAX);

        let margin_percent = if total_sales == 0 {
            Decimal::ZERO
        } else {
            (Decimal::from(gross_margin) / Decimal::from(total_sales) * Decimal::ONE_HUNDRED)
                .round_dp(2)
        };

        Ok(SalesVsPurchase {
            total_sales,
            total_purchases,
            gross_margin,
            margin_percent,
        })
    }

    async fn inventory_turnover(
        &self,
        range: ReportRange,
    ) -> Result<Vec<TurnoverRow>, ReportsServiceError> {
        let (start, end) = range.utc_bounds()?;

        let mut tx = self.db.begin().await?;
        let records = self
            .repository
            .inventory_turnover(&mut tx, start, end)
            .await?;
        tx.commit().await?;

        let rows = records
            .into_iter()
            .map(|record| {
                let divisor = u64::from(record.stock_quantity.max(1));
                let turnover =
                    (Decimal::from(record.units_sold) / Decimal::from(divisor)).round_dp(2);

                TurnoverRow {
                    product_uuid: record.product_uuid,
                    product_name: record.product_name,
                    product_sku: record.product_sku,
                    units_sold: record.units_sold,
                    stock_quantity: record.stock_quantity,
                    stock_value: record.price.saturating_mul(u64::from(record.stock_quantity)),
                    turnover,
                }
            })
            .collect();

        Ok(rows)
    }

    async fn supplier_performance(
        &self,
        range: ReportRange,
    ) -> Result<Vec<SupplierPerformanceRow>, ReportsServiceError> {
        let (start, end) = range.utc_bounds()?;

        let mut tx = self.db.begin().await?;
        let rows = self
            .repository
            .supplier_performance(&mut tx, start, end)
            .await?;
        tx.commit().await?;

        Ok(rows)
    }
}

#[automock]
#[async_trait]
pub trait ReportsService: Send + Sync {
    /// Order count, revenue, discount and tax totals, average order value.
    async fn sales_summary(&self, range: ReportRange) -> Result<SalesSummary, ReportsServiceError>;

    /// Sales against purchasing spend, with gross margin.
    async fn sales_vs_purchase(
        &self,
        range: ReportRange,
    ) -> Result<SalesVsPurchase, ReportsServiceError>;

    /// Per-product units sold, stock level and value, turnover ratio.
    async fn inventory_turnover(
        &self,
        range: ReportRange,
    ) -> Result<Vec<TurnoverRow>, ReportsServiceError>;

    /// Per-supplier purchase order counts and spend.
    async fn supplier_performance(
        &self,
        range: ReportRange,
    ) -> Result<Vec<SupplierPerformanceRow>, ReportsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{civil::Date, tz::TimeZone};
    use rust_decimal::Decimal;
    use testresult::TestResult;
    use tillpoint_pricing::DiscountPercent;
    use uuid::Uuid;

    use crate::{
        domain::{
            carts::{models::NewCart, service::CartsService},
            checkout::{
                models::{CheckoutRequest, CustomerDetails},
                service::CheckoutService,
            },
            products::{models::NewProduct, service::ProductsService},
            purchasing::{
                models::{NewPurchaseOrder, NewSupplier, PurchaseStatus},
                service::PurchasingService,
            },
        },
        test::TestContext,
    };

    use super::*;

    fn today() -> Date {
        jiff::Timestamp::now().to_zoned(TimeZone::UTC).date()
    }

    fn today_range() -> ReportRange {
        ReportRange::new(today(), today())
    }

    async fn sell(ctx: &TestContext, sku: &str, quantity: u32) {
        let cart = Uuid::now_v7();
        ctx.carts
            .create_cart(NewCart { uuid: cart })
            .await
            .expect("create_cart should succeed");
        ctx.carts
            .add_item(cart, sku, quantity)
            .await
            .expect("add_item should succeed");
        ctx.checkout
            .checkout(
                cart,
                CheckoutRequest {
                    payment_method: "cash".to_string(),
                    discount: DiscountPercent::ZERO,
                    customer: CustomerDetails::default(),
                },
            )
            .await
            .expect("checkout should succeed");
    }

    #[tokio::test]
    async fn empty_range_metrics_are_all_zero() -> TestResult {
        let ctx = TestContext::new().await;

        let summary = ctx.reports.sales_summary(today_range()).await?;
        assert_eq!(summary, SalesSummary::default());

        let margin = ctx.reports.sales_vs_purchase(today_range()).await?;
        assert_eq!(margin, SalesVsPurchase::default());

        let turnover = ctx.reports.inventory_turnover(today_range()).await?;
        assert!(turnover.is_empty());

        let suppliers = ctx.reports.supplier_performance(today_range()).await?;
        assert!(suppliers.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn inverted_range_is_rejected() {
        let ctx = TestContext::new().await;

        let range = ReportRange::new(today(), today().yesterday().expect("valid date"));
        let result = ctx.reports.sales_summary(range).await;

        assert!(
            matches!(result, Err(ReportsServiceError::InvalidRange(_))),
            "expected InvalidRange, got {result:?}"
        );
    }

    #[tokio::test]
    async fn sales_summary_aggregates_committed_orders() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.products
            .create_product(NewProduct {
                uuid: Uuid::now_v7(),
                name: "Widget".to_string(),
                sku: "WIDGET".to_string(),
                price: 1000,
                stock_quantity: 10,
            })
            .await?;

        sell(&ctx, "WIDGET", 1).await;
        sell(&ctx, "WIDGET", 3).await;

        let summary = ctx.reports.sales_summary(today_range()).await?;

        assert_eq!(summary.order_count, 2);
        // 1000 and 3000 plus 15% tax each: 1150 + 3450.
        assert_eq!(summary.gross_revenue, 4600);
        assert_eq!(summary.discount_total, 0);
        assert_eq!(summary.tax_total, 600);
        assert_eq!(summary.average_order_value, 2300);

        Ok(())
    }

    #[tokio::test]
    async fn turnover_ranks_sold_through_products() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.products
            .create_product(NewProduct {
                uuid: Uuid::now_v7(),
                name: "Candle".to_string(),
                sku: "CANDLE".to_string(),
                price: 500,
                stock_quantity: 2,
            })
            .await?;

        sell(&ctx, "CANDLE", 2).await;

        let rows = ctx.reports.inventory_turnover(today_range()).await?;
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.units_sold, 2);
        assert_eq!(row.stock_quantity, 0);
        assert_eq!(row.stock_value, 0);
        // Zero stock divides by one, so the ratio equals units sold.
        assert_eq!(row.turnover, Decimal::from(2));

        Ok(())
    }

    #[tokio::test]
    async fn supplier_performance_counts_received_orders() -> TestResult {
        let ctx = TestContext::new().await;

        let supplier = ctx
            .purchasing
            .create_supplier(NewSupplier {
                uuid: Uuid::now_v7(),
                name: "Acme Supply".to_string(),
            })
            .await?;

        for status in [PurchaseStatus::Received, PurchaseStatus::Pending] {
            ctx.purchasing
                .record_purchase(NewPurchaseOrder {
                    uuid: Uuid::now_v7(),
                    supplier_uuid: supplier.uuid,
                    status,
                    total_amount: 12_000,
                })
                .await?;
        }

        let rows = ctx.reports.supplier_performance(today_range()).await?;
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.supplier_name, "Acme Supply");
        assert_eq!(row.order_count, 2);
        assert_eq!(row.total_spent, 24_000);
        assert_eq!(row.received_count, 1);

        Ok(())
    }

    #[tokio::test]
    async fn margin_percent_is_zero_without_sales() -> TestResult {
        let ctx = TestContext::new().await;

        let supplier = ctx
            .purchasing
            .create_supplier(NewSupplier {
                uuid: Uuid::now_v7(),
                name: "Acme Supply".to_string(),
            })
            .await?;
        ctx.purchasing
            .record_purchase(NewPurchaseOrder {
                uuid: Uuid::now_v7(),
                supplier_uuid: supplier.uuid,
                status: PurchaseStatus::Ordered,
                total_amount: 9_000,
            })
            .await?;

        let margin = ctx.reports.sales_vs_purchase(today_range()).await?;

        assert_eq!(margin.total_sales, 0);
        assert_eq!(margin.total_purchases, 9_000);
        assert_eq!(margin.gross_margin, -9_000);
        assert_eq!(margin.margin_percent, Decimal::ZERO);

        Ok(())
    }
}
