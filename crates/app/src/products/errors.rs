//! Products service errors.

use std::time::Duration;

use thiserror::Error;

use crate::products::{models::ProductId, store::StoreError};

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("no entries found with id: {0}")]
    NotFound(ProductId),

    /// More than one stored item shares an `id`. This is a data-integrity fault.
    #[error("found more than one entry with id: {0}")]
    DuplicateRecords(ProductId),

    /// The item vanished, or never existed, when the conditional write ran.
    #[error("no existing product with id: {0}")]
    PreconditionFailed(ProductId),

    #[error("store request timed out after {0:?}")]
    StoreTimeout(Duration),

    #[error("store request failed: {0}")]
    Store(#[source] StoreError),
}

impl From<StoreError> for ProductsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Timeout(after) => Self::StoreTimeout(after),
            StoreError::ConditionFailed
            | StoreError::Request { .. }
            | StoreError::InvalidItem(_) => Self::Store(error),
        }
    }
}
