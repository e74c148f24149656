//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use storefront_app::{
    gateway::{Dispatcher, ResponseBuilder, StatusPolicy},
    products::{MockProductsService, codec::ValidationPolicy},
};

use crate::{router::app_router, state::State};

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_create_product().never();
    products.expect_get_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    Arc::new(State::new(Dispatcher::new(
        Arc::new(products),
        ValidationPolicy::Lenient,
        ResponseBuilder::new(StatusPolicy::Legacy),
    )))
}

pub(crate) fn products_service(products: MockProductsService) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_products(products)))
            .push(app_router()),
    )
}

/// A service whose products mock fails the test if it is ever called.
pub(crate) fn strict_products_service() -> Service {
    products_service(strict_products_mock())
}
