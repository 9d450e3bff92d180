//! Purchasing Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use uuid::Uuid;

/// Supplier Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supplier {
    pub uuid: Uuid,
    pub name: String,
    pub created_at: Timestamp,
}

/// New Supplier Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSupplier {
    pub uuid: Uuid,
    pub name: String,
}

/// Lifecycle of a purchase order, matching the schema's status check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseStatus {
    Pending,
    Ordered,
    Received,
    Cancelled,
}

impl PurchaseStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ordered => "ordered",
            Self::Received => "received",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PurchaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "ordered" => Ok(Self::Ordered),
            "received" => Ok(Self::Received),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown purchase status: {other}")),
        }
    }
}

/// PurchaseOrder Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOrder {
    pub uuid: Uuid,
    pub supplier_uuid: Uuid,
    pub status: PurchaseStatus,
    pub total_amount: u64,
    pub created_at: Timestamp,
}

/// New PurchaseOrder Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchaseOrder {
    pub uuid: Uuid,
    pub supplier_uuid: Uuid,
    pub status: PurchaseStatus,
    pub total_amount: u64,
}
