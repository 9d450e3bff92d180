//! Order Handlers

pub(crate) mod get;
