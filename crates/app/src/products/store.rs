//! Products storage seam.

use std::{future::Future, sync::Arc, time::Duration};

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::products::models::{Item, ItemKey, Product, ProductId};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The existence condition attached to a write did not hold.
    #[error("conditional check failed")]
    ConditionFailed,

    #[error("{operation} request failed: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },

    #[error("invalid stored item: {0}")]
    InvalidItem(String),

    #[error("store request timed out after {0:?}")]
    Timeout(Duration),
}

impl StoreError {
    pub(crate) fn request(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Request {
            operation,
            message: message.into(),
        }
    }
}

#[automock]
#[async_trait]
pub trait ProductsStore: Send + Sync {
    /// Writes an item unconditionally, replacing any item with the same key.
    async fn put_item(&self, item: Item) -> Result<(), StoreError>;

    /// Returns up to `limit` items whose `id` matches.
    async fn query_items(&self, id: &ProductId, limit: i32) -> Result<Vec<Item>, StoreError>;

    /// Sets name and description on the addressed item, only if it exists.
    async fn update_item_if_exists(
        &self,
        key: &ItemKey,
        product: &Product,
    ) -> Result<(), StoreError>;

    /// Deletes the addressed item, only if it exists.
    async fn delete_item_if_exists(&self, key: &ItemKey) -> Result<(), StoreError>;
}

/// Bounds every call on the wrapped store by a fixed deadline.
pub struct TimeoutStore {
    inner: Arc<dyn ProductsStore>,
    timeout: Duration,
}

impl TimeoutStore {
    #[must_use]
    pub fn new(inner: Arc<dyn ProductsStore>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, StoreError>> + Send,
    ) -> Result<T, StoreError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_elapsed| StoreError::Timeout(self.timeout))?
    }
}

impl std::fmt::Debug for TimeoutStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeoutStore")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ProductsStore for TimeoutStore {
    async fn put_item(&self, item: Item) -> Result<(), StoreError> {
        self.bounded(self.inner.put_item(item)).await
    }

    async fn query_items(&self, id: &ProductId, limit: i32) -> Result<Vec<Item>, StoreError> {
        self.bounded(self.inner.query_items(id, limit)).await
    }

    async fn update_item_if_exists(
        &self,
        key: &ItemKey,
        product: &Product,
    ) -> Result<(), StoreError> {
        self.bounded(self.inner.update_item_if_exists(key, product))
            .await
    }

    async fn delete_item_if_exists(&self, key: &ItemKey) -> Result<(), StoreError> {
        self.bounded(self.inner.delete_item_if_exists(key)).await
    }
}
