//! Extension traits

mod date_range;
mod depot;
mod result;

pub(crate) use date_range::DateRangeExt as _;
pub(crate) use depot::DepotExt as _;
pub(crate) use result::ResultExt as _;
