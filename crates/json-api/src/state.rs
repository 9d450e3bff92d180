//! State

use std::sync::Arc;

use tillpoint_app::context::AppContext;
use tillpoint_pricing::TaxRate;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) tax_rate: TaxRate,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, tax_rate: TaxRate) -> Self {
        Self { app, tax_rate }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, tax_rate: TaxRate) -> Arc<Self> {
        Arc::new(Self::new(app, tax_rate))
    }
}
