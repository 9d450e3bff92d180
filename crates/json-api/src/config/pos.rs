//! Point-of-sale Config

use clap::Args;
use tillpoint_pricing::TaxRate;

/// Point-of-sale settings.
#[derive(Debug, Args)]
pub struct PosConfig {
    /// Tax rate applied at checkout, as a fraction (e.g. "0.15" for 15%)
    #[arg(long, env = "TAX_RATE", default_value = "0.15")]
    pub tax_rate: TaxRate,

    /// Hours an idle session cart survives before the expiry sweep
    #[arg(long, env = "CART_TTL_HOURS", default_value = "48")]
    pub cart_ttl_hours: i32,
}
