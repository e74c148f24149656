//! App Router

use salvo::Router;

use crate::{healthcheck, products};

pub fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("products")
                .goal(products::handler)
                .push(Router::with_path("{id}").goal(products::handler)),
        )
}
