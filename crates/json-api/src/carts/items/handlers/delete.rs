//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use tillpoint_pricing::DiscountPercent;

use crate::{
    carts::{errors::into_status_error, responses::CartResponse},
    extensions::*,
    state::State,
};

/// Remove Cart Item Handler
///
/// Removes a line from the cart and returns the repriced cart. Removing a
/// line that is already gone is not an error.
#[endpoint(
    tags("carts"),
    summary = "Remove Cart Item",
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .remove_item(cart.into_inner(), product.into_inner())
        .await
        .map_err(into_status_error)?;

    let response = CartResponse::price(cart, DiscountPercent::ZERO, state.tax_rate)?;

    Ok(Json(response))
}
