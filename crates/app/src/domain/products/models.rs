//! Product Models

use jiff::Timestamp;
use uuid::Uuid;

/// Product Model
#[derive(Debug, Clone)]
pub struct Product {
    pub uuid: Uuid,
    pub name: String,
    pub sku: String,
    pub price: u64,
    pub stock_quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: Uuid,
    pub name: String,
    pub sku: String,
    pub price: u64,
    pub stock_quantity: u32,
}

/// Product Update Model
///
/// Stock is deliberately absent: it only moves through restock and checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub sku: String,
    pub price: u64,
}
