//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderResponse},
    state::State,
};

/// Get Order Handler
///
/// Returns a committed order with its lines, for receipt re-display.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .get_order(order.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tillpoint_app::domain::orders::{MockOrdersService, OrdersServiceError};

    use crate::test_helpers::{make_order, orders_service};

    use super::*;

    fn make_service(repo: MockOrdersService) -> Service {
        orders_service(repo, Router::with_path("orders/{order}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_receipt() -> TestResult {
        let uuid = Uuid::now_v7();
        let order = make_order(uuid);

        let mut repo = MockOrdersService::new();

        repo.expect_get_order()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |_| Ok(order));

        let response: OrderResponse = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(repo))
            .await
            .take_json()
            .await?;

        assert_eq!(response.uuid, uuid);
        assert_eq!(response.order_number, "SO20260101000000abcdef");
        assert_eq!(response.total, 2588);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_unknown_order_returns_404() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut repo = MockOrdersService::new();

        repo.expect_get_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
