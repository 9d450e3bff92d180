//! Create Cart Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};
use uuid::Uuid;

use tillpoint_app::domain::carts::models::NewCart;
use tillpoint_pricing::DiscountPercent;

use crate::{
    carts::{errors::into_status_error, responses::CartResponse},
    extensions::*,
    state::State,
};

/// Create Cart Handler
///
/// Opens a new, empty session cart. The cart uuid in the response is the
/// session key used by every subsequent cart call.
#[endpoint(
    tags("carts"),
    summary = "Create Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Cart created"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .create_cart(NewCart {
            uuid: Uuid::now_v7(),
        })
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/carts/{}", cart.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    let response = CartResponse::price(cart, DiscountPercent::ZERO, state.tax_rate)?;

    Ok(Json(response))
}
