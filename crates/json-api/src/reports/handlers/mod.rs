//! Report Handlers

pub(crate) mod inventory_turnover;
pub(crate) mod sales_summary;
pub(crate) mod sales_vs_purchase;
pub(crate) mod supplier_performance;
