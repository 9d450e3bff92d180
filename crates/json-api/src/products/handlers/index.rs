//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, products::get::ProductResponse, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Returns the product catalog, optionally filtered by a search term.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = match q.into_inner() {
        Some(term) => state.app.products.search_products(&term).await,
        None => state.app.products.list_products().await,
    }
    .or_500("failed to fetch products")?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tillpoint_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(repo: MockProductsService) -> Service {
        products_service(repo, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_products() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_list_products().once().return_once(|| {
            Ok(vec![
                make_product(uuid::Uuid::now_v7(), "A-1", 100, 1),
                make_product(uuid::Uuid::now_v7(), "B-2", 200, 2),
            ])
        });

        repo.expect_search_products().never();

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(repo))
            .await
            .take_json()
            .await?;

        assert_eq!(response.products.len(), 2, "expected two products");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_with_term_searches() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_search_products()
            .once()
            .withf(|term| term == "widget")
            .return_once(|_| Ok(vec![]));

        repo.expect_list_products().never();

        let res = TestClient::get("http://example.com/products?q=widget")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_service_error_returns_500() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_list_products()
            .once()
            .return_once(|| Err(ProductsServiceError::InvalidData));

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
