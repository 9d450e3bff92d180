//! Reports

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::ReportsServiceError;
pub use models::ReportRange;
pub use service::*;
