//! Storage key resolution.
//!
//! Callers only ever know a product's `id`. When the table is keyed on `id`
//! alone that is the whole key; when it is keyed on `(id, dateModified)` the
//! marker half has to be discovered with a lookup before any write can address
//! the item.

use std::sync::Arc;

use async_trait::async_trait;
use clap::ValueEnum;
use tracing::debug;

use crate::products::{
    errors::ProductsServiceError,
    models::{Item, ItemKey, ProductId},
    store::ProductsStore,
};

/// Enough to tell "exactly one" from "more than one".
pub(crate) const LOOKUP_LIMIT: i32 = 2;

/// Primary key layout of the products table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum KeySchema {
    /// Partition key `id` only.
    #[default]
    Simple,

    /// Partition key `id`, sort key `dateModified`.
    Composite,
}

impl KeySchema {
    #[must_use]
    pub fn resolver(self) -> Arc<dyn KeyResolver> {
        match self {
            Self::Simple => Arc::new(DirectKeyResolver),
            Self::Composite => Arc::new(LookupKeyResolver),
        }
    }
}

#[async_trait]
pub trait KeyResolver: Send + Sync {
    /// Resolve the full storage key for the item with the given `id`.
    async fn resolve(
        &self,
        store: &dyn ProductsStore,
        id: &ProductId,
    ) -> Result<ItemKey, ProductsServiceError>;
}

/// The identifier is the key.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectKeyResolver;

#[async_trait]
impl KeyResolver for DirectKeyResolver {
    async fn resolve(
        &self,
        _store: &dyn ProductsStore,
        id: &ProductId,
    ) -> Result<ItemKey, ProductsServiceError> {
        Ok(ItemKey::simple(id.clone()))
    }
}

/// Looks the item up by `id` and keys it by `(id, dateModified)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LookupKeyResolver;

#[async_trait]
impl KeyResolver for LookupKeyResolver {
    async fn resolve(
        &self,
        store: &dyn ProductsStore,
        id: &ProductId,
    ) -> Result<ItemKey, ProductsServiceError> {
        let item = find_unique(store, id).await?;

        debug!(%id, date_modified = %item.date_modified, "resolved composite key");

        Ok(ItemKey::composite(item.id, item.date_modified))
    }
}

/// Fetch the single item stored under `id`.
pub(crate) async fn find_unique(
    store: &dyn ProductsStore,
    id: &ProductId,
) -> Result<Item, ProductsServiceError> {
    let mut items = store.query_items(id, LOOKUP_LIMIT).await?.into_iter();

    match (items.next(), items.next()) {
        (None, _) => Err(ProductsServiceError::NotFound(id.clone())),
        (Some(item), None) => Ok(item),
        (Some(_), Some(_)) => Err(ProductsServiceError::DuplicateRecords(id.clone())),
    }
}
