//! Checkout Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tillpoint_app::domain::checkout::models::{CheckoutRequest, CustomerDetails};
use tillpoint_pricing::DiscountPercent;

use crate::{
    carts::errors::checkout_into_status_error,
    extensions::*,
    orders::responses::OrderResponse,
    state::State,
};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequestBody {
    /// How the customer paid, e.g. "cash" or "card"
    pub payment_method: String,

    /// Whole-cart discount percentage in `0..=100`
    #[serde(default)]
    pub discount_percent: Option<Decimal>,

    /// Customer identity captured at the till; omit for walk-ins
    #[serde(default)]
    pub customer: Option<CustomerBody>,
}

/// Checkout Customer
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerBody {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub address: String,
}

impl CheckoutRequestBody {
    fn into_request(self) -> Result<CheckoutRequest, StatusError> {
        let discount = match self.discount_percent {
            Some(percent) => {
                DiscountPercent::try_from(percent).or_400("discount_percent is outside 0..=100")?
            }
            None => DiscountPercent::ZERO,
        };

        let customer = self.customer.unwrap_or_default();

        Ok(CheckoutRequest {
            payment_method: self.payment_method,
            discount,
            customer: CustomerDetails {
                name: customer.name,
                phone: customer.phone,
                address: customer.address,
            },
        })
    }
}

/// Checkout Handler
///
/// Commits the cart as a sale: recomputes totals, decrements stock, writes
/// the order and its stock movements, and deletes the cart. All or nothing.
#[endpoint(
    tags("carts"),
    summary = "Checkout Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Sale committed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    json: JsonBody<CheckoutRequestBody>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = json.into_inner().into_request()?;

    let order = state
        .app
        .checkout
        .checkout(cart.into_inner(), request)
        .await
        .map_err(checkout_into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
