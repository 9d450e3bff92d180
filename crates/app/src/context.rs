//! App Context

use std::sync::Arc;

use thiserror::Error;
use tillpoint_pricing::TaxRate;

use crate::{
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        checkout::{CheckoutService, PgCheckoutService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        purchasing::{PgPurchasingService, PurchasingService},
        reports::{PgReportsService, ReportsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub orders: Arc<dyn OrdersService>,
    pub reports: Arc<dyn ReportsService>,
    pub purchasing: Arc<dyn PurchasingService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str, tax_rate: TaxRate) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        Ok(Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            checkout: Arc::new(PgCheckoutService::new(db.clone(), tax_rate)),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            reports: Arc::new(PgReportsService::new(db.clone())),
            purchasing: Arc::new(PgPurchasingService::new(db)),
        })
    }
}
