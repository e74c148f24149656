//! Depot helper extensions.

use std::sync::Arc;

use salvo::prelude::{Depot, StatusError};
use tracing::error;

use crate::{request_logging::REQUEST_ID_DEPOT_KEY, state::State};

/// Typed access to values the middleware stack leaves in the depot.
pub(crate) trait DepotExt {
    fn state_or_500(&self) -> Result<&Arc<State>, StatusError>;

    /// The id assigned by the request logging middleware, if it ran.
    fn request_id(&self) -> Option<&str>;
}

impl DepotExt for Depot {
    fn state_or_500(&self) -> Result<&Arc<State>, StatusError> {
        self.obtain::<Arc<State>>().map_err(|_ignored| {
            error!("gateway state missing from depot");

            StatusError::internal_server_error()
        })
    }

    fn request_id(&self) -> Option<&str> {
        self.get::<String>(REQUEST_ID_DEPOT_KEY)
            .ok()
            .map(String::as_str)
    }
}
