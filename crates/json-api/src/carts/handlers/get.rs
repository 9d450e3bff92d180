//! Get Cart Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use tillpoint_pricing::DiscountPercent;

use crate::{
    carts::{errors::into_status_error, responses::CartResponse},
    extensions::*,
    state::State,
};

/// Parses an optional `discount_percent` query value into a validated rate.
pub(crate) fn parse_discount(raw: Option<String>) -> Result<DiscountPercent, StatusError> {
    let Some(raw) = raw else {
        return Ok(DiscountPercent::ZERO);
    };

    let percent: Decimal = raw
        .parse()
        .or_400("discount_percent is not a decimal number")?;

    DiscountPercent::try_from(percent).or_400("discount_percent is outside 0..=100")
}

/// Get Cart Handler
///
/// Returns the cart with its lines and live session totals. An optional
/// `discount_percent` query previews the receipt at that discount.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    discount_percent: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let discount = parse_discount(discount_percent.into_inner())?;

    let cart = state
        .app
        .carts
        .get_cart(cart.into_inner())
        .await
        .map_err(into_status_error)?;

    let response = CartResponse::price(cart, discount, state.tax_rate)?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tillpoint_app::domain::carts::{CartsServiceError, MockCartsService, models::CartItem};

    use crate::test_helpers::{carts_service, make_cart};

    use super::*;

    fn make_service(repo: MockCartsService) -> Service {
        carts_service(repo, Router::with_path("carts/{cart}").get(handler))
    }

    fn cart_with_line(uuid: Uuid) -> tillpoint_app::domain::carts::models::Cart {
        let mut cart = make_cart(uuid);

        cart.items.push(CartItem {
            product_uuid: Uuid::now_v7(),
            product_name: "Product WIDGET".to_string(),
            product_sku: "WIDGET".to_string(),
            unit_price: 1250,
            quantity: 2,
        });

        cart
    }

    #[tokio::test]
    async fn test_get_prices_cart_without_discount() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut repo = MockCartsService::new();

        repo.expect_get_cart()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |_| Ok(cart_with_line(uuid)));

        let body: CartResponse = TestClient::get(format!("http://example.com/carts/{uuid}"))
            .send(&make_service(repo))
            .await
            .take_json()
            .await?;

        // 2500 subtotal, 15% tax, no discount.
        assert_eq!(body.totals.subtotal, 2500);
        assert_eq!(body.totals.discount_amount, 0);
        assert_eq!(body.totals.tax_amount, 375);
        assert_eq!(body.totals.total, 2875);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_previews_discounted_totals() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut repo = MockCartsService::new();

        repo.expect_get_cart()
            .once()
            .return_once(move |_| Ok(cart_with_line(uuid)));

        let body: CartResponse =
            TestClient::get(format!("http://example.com/carts/{uuid}?discount_percent=10"))
                .send(&make_service(repo))
                .await
                .take_json()
                .await?;

        // 2500 less 250 discount, then 15% tax on 2250.
        assert_eq!(body.totals.discount_amount, 250);
        assert_eq!(body.totals.tax_amount, 338);
        assert_eq!(body.totals.total, 2588);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_rejects_out_of_range_discount() -> TestResult {
        let uuid = Uuid::now_v7();

        let res = TestClient::get(format!(
            "http://example.com/carts/{uuid}?discount_percent=150"
        ))
        .send(&make_service(MockCartsService::new()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_unknown_cart_returns_404() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut repo = MockCartsService::new();

        repo.expect_get_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/carts/{uuid}"))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
