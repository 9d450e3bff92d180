//! App Router

use salvo::Router;

use crate::{carts, orders, products, reports};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(Router::with_path("lookup").get(products::lookup::handler))
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .push(Router::with_path("restock").post(products::restock::handler)),
                ),
        )
        .push(
            Router::with_path("carts").post(carts::create::handler).push(
                Router::with_path("{cart}")
                    .get(carts::get::handler)
                    .push(Router::with_path("checkout").post(carts::checkout::handler))
                    .push(
                        Router::with_path("items")
                            .post(carts::items::create::handler)
                            .delete(carts::items::clear::handler)
                            .push(
                                Router::with_path("{product}")
                                    .put(carts::items::update::handler)
                                    .delete(carts::items::delete::handler),
                            ),
                    ),
            ),
        )
        .push(Router::with_path("orders/{order}").get(orders::get::handler))
        .push(
            Router::with_path("reports")
                .push(Router::with_path("sales-summary").get(reports::sales_summary::handler))
                .push(
                    Router::with_path("sales-vs-purchase")
                        .get(reports::sales_vs_purchase::handler),
                )
                .push(
                    Router::with_path("inventory-turnover")
                        .get(reports::inventory_turnover::handler),
                )
                .push(
                    Router::with_path("supplier-performance")
                        .get(reports::supplier_performance::handler),
                ),
        )
}
