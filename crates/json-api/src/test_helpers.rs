//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use autoparts_app::{
    context::AppContext,
    domain::{
        callers::CallerUuid,
        carts::{MockCartsService, models::{Cart, CartUuid}},
        products::{MockProductsService, models::{Product, ProductUuid}},
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_CALLER_UUID: CallerUuid = CallerUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_caller(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_caller_uuid(TEST_CALLER_UUID);
    ctrl.call_next(req, depot, res).await;
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_delete_product().never();

    products
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_list_carts().never();
    carts.expect_create_cart().never();
    carts.expect_update_cart().never();
    carts.expect_delete_cart().never();

    carts
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    State::from_app_context(AppContext {
        products: Arc::new(products),
        carts: Arc::new(strict_carts_mock()),
    })
}

pub(crate) fn state_with_carts(carts: MockCartsService) -> Arc<State> {
    State::from_app_context(AppContext {
        products: Arc::new(strict_products_mock()),
        carts: Arc::new(carts),
    })
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_products(products)))
            .push(route),
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_carts(carts)))
            .hoop(inject_caller)
            .push(route),
    )
}

pub(crate) fn make_product(name: &str, stock: u32) -> Product {
    Product {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        overview: format!("{name} overview"),
        model: "Corolla".to_string(),
        year: jiff::civil::date(2018, 1, 1),
        stock,
        price: 10_00,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart(uuid: CartUuid) -> Cart {
    Cart {
        uuid,
        owner: TEST_CALLER_UUID,
        items: vec![],
        delivery_time: None,
        order_completed: false,
        created_at: Timestamp::UNIX_EPOCH,
    }
}
