//! Report Endpoints

pub(crate) mod errors;
pub(crate) mod export;
mod handlers;

pub(crate) use handlers::*;
