//! Sales Summary Report Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tillpoint_app::domain::reports::models::SalesSummary;

use crate::{
    extensions::*,
    reports::{
        errors::into_status_error,
        export::{self, ExportFormat, ReportTable},
    },
    state::State,
};

/// Sales Summary Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SalesSummaryResponse {
    /// Orders committed in the range
    pub order_count: u64,

    /// Total charged, in minor units
    pub gross_revenue: u64,

    /// Total discount given, in minor units
    pub discount_total: u64,

    /// Total tax collected, in minor units
    pub tax_total: u64,

    /// Gross revenue over order count, in minor units
    pub average_order_value: u64,
}

impl From<SalesSummary> for SalesSummaryResponse {
    fn from(summary: SalesSummary) -> Self {
        Self {
            order_count: summary.order_count,
            gross_revenue: summary.gross_revenue,
            discount_total: summary.discount_total,
            tax_total: summary.tax_total,
            average_order_value: summary.average_order_value,
        }
    }
}

fn table(summary: &SalesSummary) -> ReportTable {
    let mut table = ReportTable::new("Sales Summary", &["Metric", "Value"]);

    table.push_row(vec!["Orders".to_string(), summary.order_count.to_string()]);
    table.push_row(vec![
        "Gross revenue".to_string(),
        summary.gross_revenue.to_string(),
    ]);
    table.push_row(vec![
        "Discount total".to_string(),
        summary.discount_total.to_string(),
    ]);
    table.push_row(vec!["Tax total".to_string(), summary.tax_total.to_string()]);
    table.push_row(vec![
        "Average order value".to_string(),
        summary.average_order_value.to_string(),
    ]);

    table
}

/// Sales Summary Report Handler
///
/// Order count, revenue, discount and tax totals, and average order value
/// over an inclusive date range. `format=csv|xlsx|pdf` downloads the same
/// figures as a file.
#[endpoint(
    tags("reports"),
    summary = "Sales Summary Report",
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

    let summary = state
        .app
        .reports
        .sales_summary(range)
        .await
        .map_err(into_status_error)?;

    match format {
        ExportFormat::Json => res.render(Json(SalesSummaryResponse::from(summary))),
        ExportFormat::File(file) => export::attach(res, file, &table(&summary))?,
    }

    Ok(())
}
