//! Handler error taxonomy.

use thiserror::Error;

use crate::products::{ProductsServiceError, codec::ProductCodecError};

/// Every way a products request can fail. Each variant becomes exactly one
/// error response.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Undecodable or rejected request body.
    #[error(transparent)]
    Codec(#[from] ProductCodecError),

    #[error("empty id on path params")]
    MissingIdentifier,

    #[error(transparent)]
    Service(#[from] ProductsServiceError),

    #[error("error marshalling item: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("method not defined: {0}")]
    UnsupportedOperation(String),
}

impl HandlerError {
    /// Whether the caller is at fault.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Codec(_) | Self::MissingIdentifier)
    }
}
