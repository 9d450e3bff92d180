//! Cart Item Endpoints

mod handlers;

pub(crate) use handlers::*;
