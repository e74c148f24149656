//! Product request body decoding.

use clap::ValueEnum;
use thiserror::Error;

use crate::products::models::Product;

/// Errors raised while decoding a product payload. Both are client faults.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductCodecError {
    #[error("error decoding request body: {0}")]
    Decode(String),

    #[error("error product validation: {0}")]
    Validation(&'static str),
}

/// Validation applied after structural decoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ValidationPolicy {
    /// Accept any structurally valid payload, empty strings included.
    #[default]
    Lenient,

    /// Reject payloads whose name or description is empty.
    RequireNonEmpty,
}

impl ValidationPolicy {
    /// Decode a request body into a [`Product`] and apply this policy.
    ///
    /// # Errors
    ///
    /// Returns [`ProductCodecError::Decode`] when the body is not a JSON object of
    /// the expected shape, and [`ProductCodecError::Validation`] when the policy
    /// rejects the decoded values.
    pub fn decode(self, body: &str) -> Result<Product, ProductCodecError> {
        let product: Product = serde_json::from_str(body)
            .map_err(|error| ProductCodecError::Decode(error.to_string()))?;

        self.validate(&product)?;

        Ok(product)
    }

    fn validate(self, product: &Product) -> Result<(), ProductCodecError> {
        match self {
            Self::Lenient => Ok(()),
            Self::RequireNonEmpty if product.name.is_empty() => {
                Err(ProductCodecError::Validation("name must not be empty"))
            }
            Self::RequireNonEmpty if product.description.is_empty() => {
                Err(ProductCodecError::Validation("description must not be empty"))
            }
            Self::RequireNonEmpty => Ok(()),
        }
    }
}
