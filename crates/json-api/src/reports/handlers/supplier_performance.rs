//! Supplier Performance Report Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tillpoint_app::domain::reports::models::SupplierPerformanceRow;

use crate::{
    extensions::*,
    reports::{
        errors::into_status_error,
        export::{self, ExportFormat, ReportTable},
    },
    state::State,
};

/// Supplier Performance Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SupplierPerformanceResponse {
    pub rows: Vec<SupplierPerformanceRowResponse>,
}

/// Supplier Performance Row
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SupplierPerformanceRowResponse {
    pub supplier_uuid: Uuid,
    pub supplier_name: String,

    /// Purchase orders placed in the range
    pub order_count: u64,

    /// Total spend across those orders, in minor units
    pub total_spent: u64,

    /// How many of those orders were received
    pub received_count: u64,
}

impl From<SupplierPerformanceRow> for SupplierPerformanceRowResponse {
    fn from(row: SupplierPerformanceRow) -> Self {
        Self {
            supplier_uuid: row.supplier_uuid,
            supplier_name: row.supplier_name,
            order_count: row.order_count,
            total_spent: row.total_spent,
            received_count: row.received_count,
        }
    }
}

fn table(rows: &[SupplierPerformanceRow]) -> ReportTable {
    let mut table = ReportTable::new(
        "Supplier Performance",
        &["Supplier", "Orders", "Total spent", "Received"],
    );

    for row in rows {
        table.push_row(vec![
            row.supplier_name.clone(),
            row.order_count.to_string(),
            row.total_spent.to_string(),
            row.received_count.to_string(),
        ]);
    }

    table
}

/// Supplier Performance Report Handler
///
/// Per-supplier purchase order counts, spend, and received counts over an
/// inclusive date range.
#[endpoint(
    tags("reports"),
    summary = "Supplier Performance Report",
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
        .supplier_performance(range)
        .await
        .map_err(into_status_error)?;

    match format {
        ExportFormat::Json => res.render(Json(SupplierPerformanceResponse {
            rows: rows
                .into_iter()
                .map(SupplierPerformanceRowResponse::from)
                .collect(),
        })),
        ExportFormat::File(file) => export::attach(res, file, &table(&rows))?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tillpoint_app::domain::reports::{MockReportsService, ReportsServiceError};

    use crate::test_helpers::reports_service;

    use super::*;

    fn make_service(repo: MockReportsService) -> Service {
        reports_service(
            repo,
            Router::with_path("reports/supplier-performance").get(handler),
        )
    }

    #[tokio::test]
    async fn test_rows_serialize_per_supplier() -> TestResult {
        let supplier = Uuid::now_v7();

        let mut repo = MockReportsService::new();

        repo.expect_supplier_performance().once().return_once(move |_| {
            Ok(vec![SupplierPerformanceRow {
                supplier_uuid: supplier,
                supplier_name: "Acme Wholesale".to_string(),
                order_count: 3,
                total_spent: 90000,
                received_count: 2,
            }])
        });

        let body: SupplierPerformanceResponse =
            TestClient::get("http://example.com/reports/supplier-performance")
                .send(&make_service(repo))
                .await
                .take_json()
                .await?;

        assert_eq!(body.rows.len(), 1);
        assert_eq!(body.rows[0].supplier_uuid, supplier);
        assert_eq!(body.rows[0].received_count, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_inverted_range_returns_400() -> TestResult {
        let mut repo = MockReportsService::new();

        repo.expect_supplier_performance().once().return_once(|_| {
            Err(ReportsServiceError::InvalidRange(
                "start 2026-02-01 is after end 2026-01-01".to_string(),
            ))
        });

        let res = TestClient::get(
            "http://example.com/reports/supplier-performance?start=2026-02-01&end=2026-01-01",
        )
        .send(&make_service(repo))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
