//! Report Errors

use salvo::prelude::StatusError;
use tracing::error;

use tillpoint_app::domain::reports::ReportsServiceError;

pub(crate) fn into_status_error(error: ReportsServiceError) -> StatusError {
    match error {
        ReportsServiceError::InvalidRange(reason) => StatusError::bad_request().brief(reason),
        ReportsServiceError::Sql(source) => {
            error!("report query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
