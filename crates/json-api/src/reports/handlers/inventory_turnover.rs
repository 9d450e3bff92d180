//! Inventory Turnover Report Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tillpoint_app::domain::reports::models::TurnoverRow;

use crate::{
    extensions::*,
    reports::{
        errors::into_status_error,
        export::{self, ExportFormat, ReportTable},
    },
    state::State,
};

/// Inventory Turnover Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TurnoverResponse {
    pub rows: Vec<TurnoverRowResponse>,
}

/// Inventory Turnover Row
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TurnoverRowResponse {
    pub product_uuid: Uuid,
    pub product_name: String,
    pub product_sku: String,

    /// Units sold in the range
    pub units_sold: u64,

    /// Units currently on hand
    pub stock_quantity: u32,

    /// Current stock at current price, in minor units
    pub stock_value: u64,

    /// Units sold over current stock, two decimal places
    pub turnover: String,
}

impl From<TurnoverRow> for TurnoverRowResponse {
    fn from(row: TurnoverRow) -> Self {
        Self {
            product_uuid: row.product_uuid,
            product_name: row.product_name,
            product_sku: row.product_sku,
            units_sold: row.units_sold,
            stock_quantity: row.stock_quantity,
            stock_value: row.stock_value,
            turnover: row.turnover.to_string(),
        }
    }
}

fn table(rows: &[TurnoverRow]) -> ReportTable {
    let mut table = ReportTable::new(
        "Inventory Turnover",
        &["Product", "SKU", "Units sold", "Stock", "Stock value", "Turnover"],
    );

    for row in rows {
        table.push_row(vec![
            row.product_name.clone(),
            row.product_sku.clone(),
            row.units_sold.to_string(),
            row.stock_quantity.to_string(),
            row.stock_value.to_string(),
            row.turnover.to_string(),
        ]);
    }

    table
}

/// Inventory Turnover Report Handler
///
/// Per-product units sold, stock level and value, and turnover ratio over an
/// inclusive date range, fastest movers first.
#[endpoint(
    tags("reports"),
    summary = "Inventory Turnover Report",
    responses(
        (status_code = StatusCode::OK, description = "Report"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_IMPLEMENTED, description = "Export format not enabled"),
    ),
)]
pub(crate) async fn handler(
    start: QueryParam<String, false>,
    end: QueryParam<String, false>,
    format: QueryParam<String, false>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let range = (start, end).into_report_range()?;
    let format = ExportFormat::from_query(format.into_inner())?;

    let rows = state
        .app
        .reports
        .inventory_turnover(range)
        .await
        .map_err(into_status_error)?;

    match format {
        ExportFormat::Json => res.render(Json(TurnoverResponse {
            rows: rows.into_iter().map(TurnoverRowResponse::from).collect(),
        })),
        ExportFormat::File(file) => export::attach(res, file, &table(&rows))?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tillpoint_app::domain::reports::MockReportsService;

    use crate::test_helpers::reports_service;

    use super::*;

    fn make_service(repo: MockReportsService) -> Service {
        reports_service(
            repo,
            Router::with_path("reports/inventory-turnover").get(handler),
        )
    }

    fn widget_row() -> TurnoverRow {
        TurnoverRow {
            product_uuid: Uuid::now_v7(),
            product_name: "Product WIDGET".to_string(),
            product_sku: "WIDGET".to_string(),
            units_sold: 8,
            stock_quantity: 2,
            stock_value: 2500,
            turnover: Decimal::new(400, 2),
        }
    }

    #[tokio::test]
    async fn test_rows_serialize_with_turnover_ratio() -> TestResult {
        let mut repo = MockReportsService::new();

        repo.expect_inventory_turnover()
            .once()
            .return_once(|_| Ok(vec![widget_row()]));

        let body: TurnoverResponse =
            TestClient::get("http://example.com/reports/inventory-turnover")
                .send(&make_service(repo))
                .await
                .take_json()
                .await?;

        assert_eq!(body.rows.len(), 1);
        assert_eq!(body.rows[0].units_sold, 8);
        assert_eq!(body.rows[0].turnover, "4.00");

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_range_exports_headers_only() -> TestResult {
        let mut repo = MockReportsService::new();

        repo.expect_inventory_turnover()
            .once()
            .return_once(|_| Ok(Vec::new()));

        let text = TestClient::get("http://example.com/reports/inventory-turnover?format=csv")
            .send(&make_service(repo))
            .await
            .take_string()
            .await?;

        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("Product,SKU"));

        Ok(())
    }
}
