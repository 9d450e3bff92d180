//! Order Errors

use salvo::prelude::StatusError;
use tracing::error;

use tillpoint_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found(),
        OrdersServiceError::Sql(error) => {
            error!("order lookup failed: {error}");

            StatusError::internal_server_error()
        }
    }
}
