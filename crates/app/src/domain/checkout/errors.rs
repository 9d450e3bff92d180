//! Checkout Errors

use sqlx::error::DatabaseError;
use tillpoint_pricing::TotalsError;

#[derive(thiserror::Error, Debug)]
pub enum CheckoutServiceError {
    #[error("cart not found")]
    CartNotFound,

    #[error("cart is empty")]
    EmptyCart,

    #[error("payment method is required")]
    MissingPaymentMethod,

    #[error("insufficient stock for {product}: {available} available")]
    InsufficientStock { product: String, available: u32 },

    #[error(transparent)]
    Totals(#[from] TotalsError),

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    Commit(sqlx::Error),
}

impl From<sqlx::Error> for CheckoutServiceError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::CartNotFound,
            sqlx::Error::Database(db_error) => from_database_error(db_error),
            other => Self::Commit(other),
        }
    }
}

fn from_database_error(error: Box<dyn DatabaseError>) -> CheckoutServiceError {
    use sqlx::error::ErrorKind;

    match error.kind() {
        ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
            CheckoutServiceError::InvalidData
        }
        _ => CheckoutServiceError::Commit(sqlx::Error::Database(error)),
    }
}
