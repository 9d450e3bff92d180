//! Clear Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use tillpoint_pricing::DiscountPercent;

use crate::{
    carts::{errors::into_status_error, responses::CartResponse},
    extensions::*,
    state::State,
};

/// Clear Cart Handler
///
/// Empties the cart in one call, keeping the session itself open.
#[endpoint(
    tags("carts"),
    summary = "Clear Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart cleared"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .clear_cart(cart.into_inner())
        .await
        .map_err(into_status_error)?;

    let response = CartResponse::price(cart, DiscountPercent::ZERO, state.tax_rate)?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tillpoint_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::test_helpers::{carts_service, make_cart};

    use super::*;

    fn make_service(repo: MockCartsService) -> Service {
        carts_service(repo, Router::with_path("carts/{cart}/items").delete(handler))
    }

    #[tokio::test]
    async fn test_clear_empties_the_cart() -> TestResult {
        let cart = Uuid::now_v7();

        let mut repo = MockCartsService::new();

        repo.expect_clear_cart()
            .once()
            .withf(move |c| *c == cart)
            .return_once(move |_| Ok(make_cart(cart)));

        let body: CartResponse =
            TestClient::delete(format!("http://example.com/carts/{cart}/items"))
                .send(&make_service(repo))
                .await
                .take_json()
                .await?;

        assert!(body.items.is_empty());
        assert_eq!(body.totals.subtotal, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_clear_unknown_cart_returns_404() -> TestResult {
        let cart = Uuid::now_v7();

        let mut repo = MockCartsService::new();

        repo.expect_clear_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/carts/{cart}/items"))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
