//! Sales vs Purchase Report Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tillpoint_app::domain::reports::models::SalesVsPurchase;

use crate::{
    extensions::*,
    reports::{
        errors::into_status_error,
        export::{self, ExportFormat, ReportTable},
    },
    state::State,
};

/// Sales vs Purchase Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SalesVsPurchaseResponse {
    /// Total sales revenue, in minor units
    pub total_sales: u64,

    /// Total purchasing spend, in minor units
    pub total_purchases: u64,

    /// Sales minus purchases; negative when spend outpaces sales
    pub gross_margin: i64,

    /// Margin over sales as a percentage, two decimal places
    pub margin_percent: String,
}

impl From<SalesVsPurchase> for SalesVsPurchaseResponse {
    fn from(report: SalesVsPurchase) -> Self {
        Self {
            total_sales: report.total_sales,
            total_purchases: report.total_purchases,
            gross_margin: report.gross_margin,
            margin_percent: report.margin_percent.to_string(),
        }
    }
}

fn table(report: &SalesVsPurchase) -> ReportTable {
    let mut table = ReportTable::new("Sales vs Purchase", &["Metric", "Value"]);

    table.push_row(vec![
        "Total sales".to_string(),
        report.total_sales.to_string(),
    ]);
    table.push_row(vec![
        "Total purchases".to_string(),
        report.total_purchases.to_string(),
    ]);
    table.push_row(vec![
        "Gross margin".to_string(),
        report.gross_margin.to_string(),
    ]);
    table.push_row(vec![
        "Margin percent".to_string(),
        report.margin_percent.to_string(),
    ]);

    table
}

/// Sales vs Purchase Report Handler
///
/// Sales revenue against purchasing spend, with gross margin, over an
/// inclusive date range.
#[endpoint(
    tags("reports"),
    summary = "Sales vs Purchase Report",
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

    let report = state
        .app
        .reports
        .sales_vs_purchase(range)
        .await
        .map_err(into_status_error)?;

    match format {
        ExportFormat::Json => res.render(Json(SalesVsPurchaseResponse::from(report))),
        ExportFormat::File(file) => export::attach(res, file, &table(&report))?,
    }

    Ok(())
}
