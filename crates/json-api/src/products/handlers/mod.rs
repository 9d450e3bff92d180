//! Product Handlers

pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod lookup;
pub(crate) mod restock;
pub(crate) mod update;
