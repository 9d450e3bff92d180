//! Reports service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportsServiceError {
    #[error("invalid report range: {0}")]
    InvalidRange(String),

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
