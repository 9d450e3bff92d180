//! Purchasing service.
//!
//! Purchase orders are written by external purchasing tooling; this service
//! carries the minimal create path the reports and restock flows rely on.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::purchasing::{
        errors::PurchasingServiceError,
        models::{NewPurchaseOrder, NewSupplier, PurchaseOrder, Supplier},
        repository::PgPurchasingRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgPurchasingService {
    db: Db,
    repository: PgPurchasingRepository,
}

impl PgPurchasingService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgPurchasingRepository::new(),
        }
    }
}

#[async_trait]
impl PurchasingService for PgPurchasingService {
    async fn create_supplier(
        &self,
        supplier: NewSupplier,
    ) -> Result<Supplier, PurchasingServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_supplier(&mut tx, supplier).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_suppliers(&self) -> Result<Vec<Supplier>, PurchasingServiceError> {
        let mut tx = self.db.begin().await?;

        let suppliers = self.repository.list_suppliers(&mut tx).await?;

        tx.commit().await?;

        Ok(suppliers)
    }

    async fn record_purchase(
        &self,
        purchase: NewPurchaseOrder,
    ) -> Result<PurchaseOrder, PurchasingServiceError> {
        let mut tx = self.db.begin().await?;

        let recorded = self.repository.record_purchase(&mut tx, purchase).await?;

        tx.commit().await?;

        Ok(recorded)
    }
}

#[automock]
#[async_trait]
pub trait PurchasingService: Send + Sync {
    async fn create_supplier(
        &self,
        supplier: NewSupplier,
    ) -> Result<Supplier, PurchasingServiceError>;

    async fn list_suppliers(&self) -> Result<Vec<Supplier>, PurchasingServiceError>;

    async fn record_purchase(
        &self,
        purchase: NewPurchaseOrder,
    ) -> Result<PurchaseOrder, PurchasingServiceError>;
}
