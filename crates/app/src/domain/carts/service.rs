//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{Cart, NewCart},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        products::{models::Product, repository::PgProductsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }

    /// Resolves an add's product code (identifier or barcode) to a product.
    async fn resolve_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Product, CartsServiceError> {
        let found = if let Ok(uuid) = code.parse::<Uuid>() {
            self.products_repository
                .get_product(tx, uuid)
                .await
                .map(Some)
                .or_else(|error| match error {
                    sqlx::Error::RowNotFound => Ok(None),
                    other => Err(other),
                })?
        } else {
            self.products_repository.find_by_sku(tx, code).await?
        };

        found.ok_or_else(|| CartsServiceError::UnknownProduct(code.to_string()))
    }

    /// Loads the cart's lines onto the cart head.
    async fn load_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut cart: Cart,
    ) -> Result<Cart, CartsServiceError> {
        let items = self.items_repository.get_cart_items(tx, cart.uuid).await?;

        cart.items = items;

        Ok(cart)
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn create_cart(&self, cart: NewCart) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.carts_repository.create_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_cart(&self, cart: Uuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let head = self.carts_repository.get_cart(&mut tx, cart).await?;
        let cart = self.load_items(&mut tx, head).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn add_item(
        &self,
        cart: Uuid,
        code: &str,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let head = self.carts_repository.get_cart(&mut tx, cart).await?;
        let product = self.resolve_product(&mut tx, code).await?;

        // Adding never oversells: the line after the add must still fit
        // within current stock, counting what the cart already holds.
        let in_cart = self
            .items_repository
            .get_line_quantity(&mut tx, cart, product.uuid)
            .await?;

        let requested = in_cart
            .checked_add(quantity)
            .ok_or(CartsServiceError::InvalidQuantity)?;

        if requested > product.stock_quantity {
            return Err(CartsServiceError::InsufficientStock {
                product: product.name,
                available: product.stock_quantity,
            });
        }

        self.items_repository
            .upsert_item(&mut tx, cart, product.uuid, quantity, product.price)
            .await?;

        self.carts_repository.touch_cart(&mut tx, cart).await?;

        let cart = self.load_items(&mut tx, head).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn update_quantity(
        &self,
        cart: Uuid,
        product: Uuid,
        quantity: i64,
    ) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let head = self.carts_repository.get_cart(&mut tx, cart).await?;

        if quantity <= 0 {
            // Zero or negative removes the line; already-gone is fine.
            self.items_repository
                .delete_item(&mut tx, cart, product)
                .await?;
        } else {
            let quantity =
                u32::try_from(quantity).map_err(|_ignored| CartsServiceError::InvalidQuantity)?;

            let rows_affected = self
                .items_repository
                .set_line_quantity(&mut tx, cart, product, quantity)
                .await?;

            if rows_affected == 0 {
                return Err(CartsServiceError::NotFound);
            }
        }

        self.carts_repository.touch_cart(&mut tx, cart).await?;

        let cart = self.load_items(&mut tx, head).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn remove_item(&self, cart: Uuid, product: Uuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let head = self.carts_repository.get_cart(&mut tx, cart).await?;

        self.items_repository
            .delete_item(&mut tx, cart, product)
            .await?;

        self.carts_repository.touch_cart(&mut tx, cart).await?;

        let cart = self.load_items(&mut tx, head).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn clear_cart(&self, cart: Uuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let head = self.carts_repository.get_cart(&mut tx, cart).await?;

        self.items_repository.clear_items(&mut tx, cart).await?;
        self.carts_repository.touch_cart(&mut tx, cart).await?;

        let cart = self.load_items(&mut tx, head).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn purge_expired(&self, ttl_hours: i32) -> Result<u64, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let purged = self.carts_repository.purge_expired(&mut tx, ttl_hours).await?;

        tx.commit().await?;

        if purged > 0 {
            tracing::info!(purged, "purged expired carts");
        }

        Ok(purged)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Creates a new, empty session cart.
    async fn create_cart(&self, cart: NewCart) -> Result<Cart, CartsServiceError>;

    /// Retrieve a cart with its lines in insertion order.
    async fn get_cart(&self, cart: Uuid) -> Result<Cart, CartsServiceError>;

    /// Adds a product (by identifier or barcode) to the cart, merging into an
    /// existing line for the same product. Rejects adds that would exceed
    /// current stock.
    async fn add_item(
        &self,
        cart: Uuid,
        code: &str,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError>;

    /// Sets a line's quantity; zero or negative removes the line.
    async fn update_quantity(
        &self,
        cart: Uuid,
        product: Uuid,
        quantity: i64,
    ) -> Result<Cart, CartsServiceError>;

    /// Removes a line if present; no-op otherwise.
    async fn remove_item(&self, cart: Uuid, product: Uuid) -> Result<Cart, CartsServiceError>;

    /// Empties the cart.
    async fn clear_cart(&self, cart: Uuid) -> Result<Cart, CartsServiceError>;

    /// Deletes carts idle for longer than the given TTL. Returns the count.
    async fn purge_expired(&self, ttl_hours: i32) -> Result<u64, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::products::{models::NewProduct, service::ProductsService},
        test::TestContext,
    };

    use super::*;

    async fn seed_product(ctx: &TestContext, sku: &str, price: u64, stock: u32) -> Product {
        ctx.products
            .create_product(NewProduct {
                uuid: Uuid::now_v7(),
                name: format!("Product {sku}"),
                sku: sku.to_string(),
                price,
                stock_quantity: stock,
            })
            .await
            .expect("seed product should succeed")
    }

    async fn new_cart(ctx: &TestContext) -> Cart {
        ctx.carts
            .create_cart(NewCart {
                uuid: Uuid::now_v7(),
            })
            .await
            .expect("create_cart should succeed")
    }

    #[tokio::test]
    async fn create_cart_returns_empty_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = Uuid::now_v7();

        let cart = ctx.carts.create_cart(NewCart { uuid }).await?;

        assert_eq!(cart.uuid, uuid);
        assert!(cart.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_cart_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = Uuid::now_v7();

        ctx.carts.create_cart(NewCart { uuid }).await?;

        let result = ctx.carts.create_cart(NewCart { uuid }).await;

        assert!(
            matches!(result, Err(CartsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_cart_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.carts.get_cart(Uuid::now_v7()).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn add_snapshots_price_and_merges_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let product = seed_product(&ctx, "TEA-001", 2_50, 10).await;
        let cart = new_cart(&ctx).await;

        ctx.carts
            .add_item(cart.uuid, &product.uuid.to_string(), 2)
            .await?;

        // Adding the same product again increments the existing line.
        let cart = ctx.carts.add_item(cart.uuid, "TEA-001", 3).await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 5);
        assert_eq!(cart.items[0].unit_price, 2_50);
        assert_eq!(cart.items[0].product_uuid, product.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn add_keeps_displayed_price_stable_across_repricing() -> TestResult {
        let ctx = TestContext::new().await;
        let product = seed_product(&ctx, "TEA-002", 2_50, 10).await;
        let cart = new_cart(&ctx).await;

        ctx.carts.add_item(cart.uuid, "TEA-002", 1).await?;

        // Catalog reprice mid-session must not move the line's price.
        ctx.products
            .update_product(
                product.uuid,
                crate::domain::products::models::ProductUpdate {
                    name: product.name.clone(),
                    sku: product.sku.clone(),
                    price: 9_99,
                },
            )
            .await?;

        let cart = ctx.carts.get_cart(cart.uuid).await?;

        assert_eq!(cart.items[0].unit_price, 2_50);

        Ok(())
    }

    #[tokio::test]
    async fn add_beyond_stock_is_rejected_not_clamped() -> TestResult {
        let ctx = TestContext::new().await;
        seed_product(&ctx, "MUG-001", 7_00, 3).await;
        let cart = new_cart(&ctx).await;

        ctx.carts.add_item(cart.uuid, "MUG-001", 2).await?;

        let result = ctx.carts.add_item(cart.uuid, "MUG-001", 2).await;

        match result {
            Err(CartsServiceError::InsufficientStock { available, .. }) => {
                assert_eq!(available, 3);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        // The rejected add must leave the cart unchanged.
        let cart = ctx.carts.get_cart(cart.uuid).await?;

        assert_eq!(cart.items[0].quantity, 2);

        Ok(())
    }

    #[tokio::test]
    async fn add_zero_quantity_is_invalid() -> TestResult {
        let ctx = TestContext::new().await;
        seed_product(&ctx, "MUG-002", 7_00, 3).await;
        let cart = new_cart(&ctx).await;

        let result = ctx.carts.add_item(cart.uuid, "MUG-002", 0).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_unknown_code_reports_the_code() -> TestResult {
        let ctx = TestContext::new().await;
        let cart = new_cart(&ctx).await;

        let result = ctx.carts.add_item(cart.uuid, "GHOST-SKU", 1).await;

        match result {
            Err(CartsServiceError::UnknownProduct(code)) => assert_eq!(code, "GHOST-SKU"),
            other => panic!("expected UnknownProduct, got {other:?}"),
        }

        Ok(())
    }

    #[tokio::test]
    async fn update_quantity_sets_and_zero_removes() -> TestResult {
        let ctx = TestContext::new().await;
        let product = seed_product(&ctx, "JAR-001", 4_00, 10).await;
        let cart = new_cart(&ctx).await;

        ctx.carts.add_item(cart.uuid, "JAR-001", 2).await?;

        let cart_state = ctx
            .carts
            .update_quantity(cart.uuid, product.uuid, 7)
            .await?;

        assert_eq!(cart_state.items[0].quantity, 7);

        let cart_state = ctx
            .carts
            .update_quantity(cart.uuid, product.uuid, 0)
            .await?;

        assert!(cart_state.items.is_empty());

        // Repeating the removal is a no-op, not an error.
        let cart_state = ctx
            .carts
            .update_quantity(cart.uuid, product.uuid, -1)
            .await?;

        assert!(cart_state.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn update_missing_line_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let product = seed_product(&ctx, "JAR-002", 4_00, 10).await;
        let cart = new_cart(&ctx).await;

        let result = ctx.carts.update_quantity(cart.uuid, product.uuid, 3).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn remove_is_idempotent() -> TestResult {
        let ctx = TestContext::new().await;
        let product = seed_product(&ctx, "PEN-001", 1_20, 10).await;
        let cart = new_cart(&ctx).await;

        ctx.carts.add_item(cart.uuid, "PEN-001", 1).await?;

        let cart_state = ctx.carts.remove_item(cart.uuid, product.uuid).await?;

        assert!(cart_state.items.is_empty());

        let cart_state = ctx.carts.remove_item(cart.uuid, product.uuid).await?;

        assert!(cart_state.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn clear_empties_all_lines() -> TestResult {
        let ctx = TestContext::new().await;
        seed_product(&ctx, "PEN-002", 1_20, 10).await;
        seed_product(&ctx, "PEN-003", 1_50, 10).await;
        let cart = new_cart(&ctx).await;

        ctx.carts.add_item(cart.uuid, "PEN-002", 1).await?;
        ctx.carts.add_item(cart.uuid, "PEN-003", 2).await?;

        let cart_state = ctx.carts.clear_cart(cart.uuid).await?;

        assert!(cart_state.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn lines_keep_insertion_order() -> TestResult {
        let ctx = TestContext::new().await;
        seed_product(&ctx, "Z-LAST", 1_00, 10).await;
        seed_product(&ctx, "A-FIRST", 1_00, 10).await;
        let cart = new_cart(&ctx).await;

        ctx.carts.add_item(cart.uuid, "Z-LAST", 1).await?;
        ctx.carts.add_item(cart.uuid, "A-FIRST", 1).await?;

        let cart_state = ctx.carts.get_cart(cart.uuid).await?;

        assert_eq!(cart_state.items[0].product_sku, "Z-LAST");
        assert_eq!(cart_state.items[1].product_sku, "A-FIRST");

        Ok(())
    }

    #[tokio::test]
    async fn purge_expired_drops_only_idle_carts() -> TestResult {
        let ctx = TestContext::new().await;
        let idle = new_cart(&ctx).await;
        let live = new_cart(&ctx).await;

        // Backdate the idle cart past the TTL.
        sqlx::query("UPDATE carts SET updated_at = now() - interval '48 hours' WHERE uuid = $1")
            .bind(idle.uuid)
            .execute(ctx.db.pool())
            .await?;

        let purged = ctx.carts.purge_expired(24).await?;

        assert_eq!(purged, 1);
        assert!(ctx.carts.get_cart(live.uuid).await.is_ok());
        assert!(matches!(
            ctx.carts.get_cart(idle.uuid).await,
            Err(CartsServiceError::NotFound)
        ));

        Ok(())
    }
}
