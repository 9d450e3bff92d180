//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use tillpoint_app::domain::{carts::CartsServiceError, checkout::CheckoutServiceError};

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::AlreadyExists => StatusError::conflict().brief("Cart already exists"),
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart not found"),
        CartsServiceError::UnknownProduct(code) => {
            StatusError::not_found().brief(format!("product not found: {code}"))
        }
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be a positive whole number")
        }
        CartsServiceError::InsufficientStock { product, available } => StatusError::conflict()
            .brief(format!(
                "Insufficient stock for {product}: {available} available"
            )),
        CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => StatusError::bad_request().brief("Invalid cart payload"),
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn checkout_into_status_error(error: CheckoutServiceError) -> StatusError {
    match error {
        CheckoutServiceError::CartNotFound => StatusError::not_found().brief("Cart not found"),
        CheckoutServiceError::EmptyCart => {
            StatusError::bad_request().brief("Cannot check out an empty cart")
        }
        CheckoutServiceError::MissingPaymentMethod => {
            StatusError::bad_request().brief("A payment method is required")
        }
        CheckoutServiceError::InsufficientStock { product, available } => StatusError::conflict()
            .brief(format!(
                "Insufficient stock for {product}: {available} available"
            )),
        CheckoutServiceError::Totals(source) => {
            StatusError::bad_request().brief(format!("Could not price the cart: {source}"))
        }
        CheckoutServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid checkout payload")
        }
        CheckoutServiceError::Commit(source) => {
            error!("checkout failed to commit: {source}");

            StatusError::internal_server_error()
        }
    }
}
