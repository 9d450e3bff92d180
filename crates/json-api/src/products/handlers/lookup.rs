//! Product Lookup Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Product Lookup Handler
///
/// Resolves a scanned barcode or an internal identifier to a product. A miss
/// is a 404 whose message carries the code that was scanned.
#[endpoint(
    tags("products"),
    summary = "Lookup Product by Code",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "No product for the code"),
    ),
)]
pub(crate) async fn handler(
    code: QueryParam<String, true>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .find_by_code(&code.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
