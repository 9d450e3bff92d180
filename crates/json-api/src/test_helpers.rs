//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use tillpoint_app::{
    context::AppContext,
    domain::{
        carts::{MockCartsService, models::Cart},
        checkout::MockCheckoutService,
        orders::{MockOrdersService, models::Order},
        products::{MockProductsService, models::Product},
        purchasing::MockPurchasingService,
        reports::MockReportsService,
    },
};

use tillpoint_pricing::TaxRate;

use crate::state::State;

/// Tax rate the handler fixtures assume: 15%.
pub(crate) fn test_tax_rate() -> TaxRate {
    "0.15".parse().unwrap_or(TaxRate::ZERO)
}

/// One mock per service. Anything left untouched rejects every call, so a
/// handler reaching into the wrong service fails its test loudly.
#[derive(Default)]
pub(crate) struct Mocks {
    pub products: MockProductsService,
    pub carts: MockCartsService,
    pub checkout: MockCheckoutService,
    pub orders: MockOrdersService,
    pub reports: MockReportsService,
    pub purchasing: MockPurchasingService,
}

impl Mocks {
    pub(crate) fn into_service(self, route: Router) -> Service {
        let app = AppContext {
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
            checkout: Arc::new(self.checkout),
            orders: Arc::new(self.orders),
            reports: Arc::new(self.reports),
            purchasing: Arc::new(self.purchasing),
        };

        Service::new(
            Router::new()
                .hoop(inject(Arc::new(State::new(app, test_tax_rate()))))
                .push(route),
        )
    }
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Mocks {
        products,
        ..Mocks::default()
    }
    .into_service(route)
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    Mocks {
        carts,
        ..Mocks::default()
    }
    .into_service(route)
}

pub(crate) fn checkout_service(checkout: MockCheckoutService, route: Router) -> Service {
    Mocks {
        checkout,
        ..Mocks::default()
    }
    .into_service(route)
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    Mocks {
        orders,
        ..Mocks::default()
    }
    .into_service(route)
}

pub(crate) fn reports_service(reports: MockReportsService, route: Router) -> Service {
    Mocks {
        reports,
        ..Mocks::default()
    }
    .into_service(route)
}

pub(crate) fn make_product(uuid: Uuid, sku: &str, price: u64, stock: u32) -> Product {
    Product {
        uuid,
        name: format!("Product {sku}"),
        sku: sku.to_string(),
        price,
        stock_quantity: stock,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_cart(uuid: Uuid) -> Cart {
    Cart {
        uuid,
        items: Vec::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(uuid: Uuid) -> Order {
    Order {
        uuid,
        order_number: "SO20260101000000abcdef".to_string(),
        customer_name: "Walk-in Customer".to_string(),
        customer_phone: String::new(),
        customer_address: String::new(),
        payment_method: "cash".to_string(),
        subtotal: 2500,
        discount_amount: 250,
        tax_amount: 338,
        total: 2588,
        items: Vec::new(),
        created_at: Timestamp::UNIX_EPOCH,
    }
}
