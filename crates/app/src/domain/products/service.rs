//! Products service.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::products::{
        errors::ProductsServiceError,
        models::{NewProduct, Product, ProductUpdate},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn search_products(&self, term: &str) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.search_products(&mut tx, term).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: Uuid) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn find_by_code(&self, code: &str) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        // A code is either an internal identifier (from the grid) or a
        // scannable SKU barcode.
        let found = if let Ok(uuid) = code.parse::<Uuid>() {
            self.repository
                .get_product(&mut tx, uuid)
                .await
                .map(Some)
                .or_else(|error| match error {
                    sqlx::Error::RowNotFound => Ok(None),
                    other => Err(other),
                })?
        } else {
            self.repository.find_by_sku(&mut tx, code).await?
        };

        tx.commit().await?;

        found.ok_or_else(|| ProductsServiceError::UnknownCode(code.to_string()))
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn restock_product(
        &self,
        product: Uuid,
        quantity: u32,
        reason: &str,
    ) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let restocked = self
            .repository
            .restock_product(&mut tx, product, quantity)
            .await?;

        self.repository
            .insert_stock_movement(&mut tx, product, "IN", quantity, reason, "")
            .await?;

        tx.commit().await?;

        Ok(restocked)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all live products, ordered by name.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Finds products whose name or SKU contains the given term.
    async fn search_products(&self, term: &str) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: Uuid) -> Result<Product, ProductsServiceError>;

    /// Resolves an internal identifier or a scanned barcode to a product.
    async fn find_by_code(&self, code: &str) -> Result<Product, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Updates a product's name, SKU, and price.
    async fn update_product(
        &self,
        product: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Increments stock and records an IN movement.
    async fn restock_product(
        &self,
        product: Uuid,
        quantity: u32,
        reason: &str,
    ) -> Result<Product, ProductsServiceError>;
}
