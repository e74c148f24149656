//! Products service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::products::{
    errors::ProductsServiceError,
    keys::{KeyResolver, find_unique},
    models::{DateMarker, Item, MarkerFormat, Product, ProductId},
    store::{ProductsStore, StoreError},
};

/// Products service issuing conditional writes against a [`ProductsStore`].
#[derive(Clone)]
pub struct StoreProductsService {
    store: Arc<dyn ProductsStore>,
    keys: Arc<dyn KeyResolver>,
    marker_format: MarkerFormat,
}

impl StoreProductsService {
    #[must_use]
    pub fn new(
        store: Arc<dyn ProductsStore>,
        keys: Arc<dyn KeyResolver>,
        marker_format: MarkerFormat,
    ) -> Self {
        Self {
            store,
            keys,
            marker_format,
        }
    }
}

impl Debug for StoreProductsService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("StoreProductsService")
            .field("marker_format", &self.marker_format)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ProductsService for StoreProductsService {
    async fn create_product(&self, product: Product) -> Result<Item, ProductsServiceError> {
        let item = Item::new(
            ProductId::generate(),
            DateMarker::stamp(self.marker_format, Timestamp::now()),
            product,
        );

        self.store.put_item(item.clone()).await?;

        info!(id = %item.id, "created product");

        Ok(item)
    }

    async fn get_product(&self, id: &ProductId) -> Result<Item, ProductsServiceError> {
        find_unique(self.store.as_ref(), id).await
    }

    async fn update_product(
        &self,
        id: &ProductId,
        product: Product,
    ) -> Result<(), ProductsServiceError> {
        // Composite keys carry the stored marker, so resolve per call.
        let key = self.keys.resolve(self.store.as_ref(), id).await?;

        match self.store.update_item_if_exists(&key, &product).await {
            Err(StoreError::ConditionFailed) => {
                Err(ProductsServiceError::PreconditionFailed(id.clone()))
            }
            result => result.map_err(Into::into),
        }
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), ProductsServiceError> {
        let key = self.keys.resolve(self.store.as_ref(), id).await?;

        match self.store.delete_item_if_exists(&key).await {
            Err(StoreError::ConditionFailed) => {
                Err(ProductsServiceError::PreconditionFailed(id.clone()))
            }
            result => result.map_err(Into::into),
        }
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Creates a product under a freshly generated identifier.
    async fn create_product(&self, product: Product) -> Result<Item, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, id: &ProductId) -> Result<Item, ProductsServiceError>;

    /// Replaces the name and description of an existing product.
    ///
    /// An id with no stored record is `PreconditionFailed` under the simple key
    /// schema and `NotFound` under the composite schema, where the key lookup
    /// runs first; a record vanishing after that lookup is `PreconditionFailed`.
    async fn update_product(
        &self,
        id: &ProductId,
        product: Product,
    ) -> Result<(), ProductsServiceError>;

    /// Deletes an existing product.
    ///
    /// Deleting twice fails the second call: `PreconditionFailed` under the
    /// simple key schema, `NotFound` under the composite schema.
    async fn delete_product(&self, id: &ProductId) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        products::{
            keys::{KeySchema, LOOKUP_LIMIT},
            models::ItemKey,
            store::MockProductsStore,
        },
        test::{MemoryProductsStore, widget},
    };

    use super::*;

    fn service(store: Arc<dyn ProductsStore>, schema: KeySchema) -> StoreProductsService {
        StoreProductsService::new(store, schema.resolver(), MarkerFormat::EpochSeconds)
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips_product() -> TestResult {
        let products = service(Arc::new(MemoryProductsStore::new(KeySchema::Simple)), KeySchema::Simple);

        let created = products.create_product(widget()).await?;
        let fetched = products.get_product(&created.id).await?;

        assert_eq!(fetched, created);
        assert_eq!(fetched.product(), widget());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_stamps_marker_in_configured_format() -> TestResult {
        let products = StoreProductsService::new(
            Arc::new(MemoryProductsStore::new(KeySchema::Simple)),
            KeySchema::Simple.resolver(),
            MarkerFormat::Rfc3339,
        );

        let created = products.create_product(widget()).await?;

        assert!(matches!(
            &created.date_modified,
            DateMarker::Rfc3339(value) if value.parse::<Timestamp>().is_ok()
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_surfaces_store_failure() -> TestResult {
        let mut store = MockProductsStore::new();

        store
            .expect_put_item()
            .once()
            .return_once(|_| Err(StoreError::request("put item", "some detailed error")));

        let result = service(Arc::new(store), KeySchema::Simple)
            .create_product(widget())
            .await;

        assert!(matches!(result, Err(ProductsServiceError::Store(_))));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_of_missing_product_fails_precondition() -> TestResult {
        let products = service(Arc::new(MemoryProductsStore::new(KeySchema::Simple)), KeySchema::Simple);

        let result = products
            .update_product(&ProductId::new("missing"), widget())
            .await;

        assert!(matches!(result, Err(ProductsServiceError::PreconditionFailed(_))));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_changes_name_and_description_only() -> TestResult {
        let products = service(Arc::new(MemoryProductsStore::new(KeySchema::Simple)), KeySchema::Simple);

        let created = products.create_product(widget()).await?;

        products
            .update_product(&created.id, Product::new("widget2", "another thing"))
            .await?;

        let fetched = products.get_product(&created.id).await?;

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.date_modified, created.date_modified);
        assert_eq!(fetched.product(), Product::new("widget2", "another thing"));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_is_not_response_idempotent() -> TestResult {
        let products = service(Arc::new(MemoryProductsStore::new(KeySchema::Simple)), KeySchema::Simple);

        let created = products.create_product(widget()).await?;

        products.delete_product(&created.id).await?;

        let second = products.delete_product(&created.id).await;
        let read = products.get_product(&created.id).await;

        assert!(matches!(second, Err(ProductsServiceError::PreconditionFailed(_))));
        assert!(matches!(read, Err(ProductsServiceError::NotFound(_))));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_refuses_duplicate_records() -> TestResult {
        let store = MemoryProductsStore::new(KeySchema::Composite);
        let id = ProductId::new("dup");

        store.insert(Item::new(id.clone(), DateMarker::EpochSeconds(1), widget()))?;
        store.insert(Item::new(id.clone(), DateMarker::EpochSeconds(2), widget()))?;

        let result = service(Arc::new(store), KeySchema::Composite)
            .get_product(&id)
            .await;

        assert!(matches!(result, Err(ProductsServiceError::DuplicateRecords(_))));

        Ok(())
    }

    #[tokio::test]
    async fn test_composite_update_writes_to_discovered_key() -> TestResult {
        let id = ProductId::new("abc");
        let stored = Item::new(id.clone(), DateMarker::EpochSeconds(1_700_000_000), widget());
        let expected = ItemKey::composite(id.clone(), DateMarker::EpochSeconds(1_700_000_000));

        let mut store = MockProductsStore::new();

        store
            .expect_query_items()
            .once()
            .withf(|id, limit| id.as_str() == "abc" && *limit == LOOKUP_LIMIT)
            .return_once(move |_, _| Ok(vec![stored]));

        store
            .expect_update_item_if_exists()
            .once()
            .withf(move |key, product| *key == expected && product.name == "widget2")
            .return_once(|_, _| Ok(()));

        store.expect_put_item().never();
        store.expect_delete_item_if_exists().never();

        service(Arc::new(store), KeySchema::Composite)
            .update_product(&id, Product::new("widget2", "a thing"))
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_composite_delete_of_vanished_item_fails_precondition() -> TestResult {
        let id = ProductId::new("abc");
        let stored = Item::new(id.clone(), DateMarker::EpochSeconds(5), widget());

        let mut store = MockProductsStore::new();

        store
            .expect_query_items()
            .once()
            .return_once(move |_, _| Ok(vec![stored]));

        store
            .expect_delete_item_if_exists()
            .once()
            .return_once(|_| Err(StoreError::ConditionFailed));

        let result = service(Arc::new(store), KeySchema::Composite)
            .delete_product(&id)
            .await;

        assert!(matches!(result, Err(ProductsServiceError::PreconditionFailed(_))));

        Ok(())
    }

    #[tokio::test]
    async fn test_composite_update_of_unknown_id_is_not_found() -> TestResult {
        let products = service(
            Arc::new(MemoryProductsStore::new(KeySchema::Composite)),
            KeySchema::Composite,
        );

        let result = products
            .update_product(&ProductId::new("missing"), widget())
            .await;

        assert!(matches!(result, Err(ProductsServiceError::NotFound(_))));

        Ok(())
    }

    #[tokio::test]
    async fn test_composite_lifecycle_keeps_key_stable() -> TestResult {
        let products = service(
            Arc::new(MemoryProductsStore::new(KeySchema::Composite)),
            KeySchema::Composite,
        );

        let created = products.create_product(widget()).await?;

        products
            .update_product(&created.id, Product::new("widget2", "a thing"))
            .await?;

        let fetched = products.get_product(&created.id).await?;

        assert_eq!(fetched.date_modified, created.date_modified);
        assert_eq!(fetched.name, "widget2");

        products.delete_product(&created.id).await?;

        assert!(matches!(
            products.get_product(&created.id).await,
            Err(ProductsServiceError::NotFound(_))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_composite_second_delete_is_not_found() -> TestResult {
        let products = service(
            Arc::new(MemoryProductsStore::new(KeySchema::Composite)),
            KeySchema::Composite,
        );

        let created = products.create_product(widget()).await?;

        products.delete_product(&created.id).await?;

        let second = products.delete_product(&created.id).await;

        assert!(matches!(second, Err(ProductsServiceError::NotFound(_))));

        Ok(())
    }

    #[tokio::test]
    async fn test_service_is_usable_as_trait_object() -> TestResult {
        let products: Arc<dyn ProductsService> = Arc::new(service(
            Arc::new(MemoryProductsStore::new(KeySchema::Simple)),
            KeySchema::Simple,
        ));

        let created = products.create_product(widget()).await?;

        products
            .update_product(&created.id, Product::new("widget2", "a thing"))
            .await?;

        assert_eq!(products.get_product(&created.id).await?.name, "widget2");

        products.delete_product(&created.id).await?;

        assert!(matches!(
            products.get_product(&created.id).await,
            Err(ProductsServiceError::NotFound(_))
        ));

        Ok(())
    }
}
