//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::orders::{errors::OrdersServiceError, models::Order, repository::PgOrdersRepository},
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn get_order(&self, order: Uuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut order = self.repository.get_order(&mut tx, order).await?;
        let items = self.repository.get_order_items(&mut tx, order.uuid).await?;

        tx.commit().await?;

        order.items = items;

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Retrieve a committed order with its line items, for receipt re-display.
    async fn get_order(&self, order: Uuid) -> Result<Order, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn get_unknown_order_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.orders.get_order(Uuid::now_v7()).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
