//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tillpoint_pricing::DiscountPercent;

use crate::{
    carts::{errors::into_status_error, responses::CartResponse},
    extensions::*,
    state::State,
};

/// Update Quantity Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateQuantityRequest {
    /// New quantity for the line; zero or negative removes it
    pub quantity: i64,
}

/// Update Cart Item Handler
///
/// Sets a line's quantity and returns the repriced cart. Zero or negative
/// removes the line.
#[endpoint(
    tags("carts"),
    summary = "Update Cart Item",
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or line not found"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    product: PathParam<Uuid>,
    json: JsonBody<UpdateQuantityRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .update_quantity(cart.into_inner(), product.into_inner(), json.quantity)
        .await
        .map_err(into_status_error)?;

    let response = CartResponse::price(cart, DiscountPercent::ZERO, state.tax_rate)?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use tillpoint_app::domain::carts::{CartsServiceError, MockCartsService, models::CartItem};

    use crate::test_helpers::{carts_service, make_cart};

    use super::*;

    fn make_service(repo: MockCartsService) -> Service {
        carts_service(
            repo,
            Router::with_path("carts/{cart}/items/{product}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_sets_line_quantity() -> TestResult {
        let cart = Uuid::now_v7();
        let product = Uuid::now_v7();

        let mut repo = MockCartsService::new();

        repo.expect_update_quantity()
            .once()
            .withf(move |c, p, quantity| *c == cart && *p == product && *quantity == 3)
            .return_once(move |_, _, _| {
                let mut updated = make_cart(cart);

                updated.items.push(CartItem {
                    product_uuid: product,
                    product_name: "Product WIDGET".to_string(),
                    product_sku: "WIDGET".to_string(),
                    unit_price: 1000,
                    quantity: 3,
                });

                Ok(updated)
            });

        let body: CartResponse =
            TestClient::put(format!("http://example.com/carts/{cart}/items/{product}"))
                .json(&json!({ "quantity": 3 }))
                .send(&make_service(repo))
                .await
                .take_json()
                .await?;

        assert_eq!(body.items[0].quantity, 3);
        assert_eq!(body.totals.subtotal, 3000);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_to_zero_removes_the_line() -> TestResult {
        let cart = Uuid::now_v7();
        let product = Uuid::now_v7();

        let mut repo = MockCartsService::new();

        repo.expect_update_quantity()
            .once()
            .withf(|_, _, quantity| *quantity == 0)
            .return_once(move |_, _, _| Ok(make_cart(cart)));

        let body: CartResponse =
            TestClient::put(format!("http://example.com/carts/{cart}/items/{product}"))
                .json(&json!({ "quantity": 0 }))
                .send(&make_service(repo))
                .await
                .take_json()
                .await?;

        assert!(body.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_line_returns_404() -> TestResult {
        let cart = Uuid::now_v7();
        let product = Uuid::now_v7();

        let mut repo = MockCartsService::new();

        repo.expect_update_quantity()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/carts/{cart}/items/{product}"))
            .json(&json!({ "quantity": 2 }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
