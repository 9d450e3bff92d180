//! Restock Product Handler

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

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Restock Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RestockRequest {
    /// Units to add to stock
    pub quantity: u32,

    /// Why stock is moving in, e.g. "restock" or "delivery"
    #[serde(default = "default_reason")]
    pub reason: String,
}

fn default_reason() -> String {
    "restock".to_string()
}

/// Restock Product Handler
///
/// Increments stock and records an IN movement.
#[endpoint(
    tags("products"),
    summary = "Restock Product",
    responses(
        (status_code = StatusCode::OK, description = "Product restocked"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<RestockRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let restocked = state
        .app
        .products
        .restock_product(product.into_inner(), request.quantity, &request.reason)
        .await
        .map_err(into_status_error)?;

    Ok(Json(restocked.into()))
}
