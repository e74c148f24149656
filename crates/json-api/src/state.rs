//! State

use std::sync::Arc;

use storefront_app::{context::AppContext, gateway::Dispatcher};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) dispatcher: Dispatcher,
}

impl State {
    #[must_use]
    pub(crate) fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self::new(app.dispatcher))
    }
}
