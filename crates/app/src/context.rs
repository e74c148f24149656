//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::{
    config::StoreConfig,
    gateway::{Dispatcher, ResponseBuilder},
    products::{
        ProductsService, StoreProductsService,
        dynamo::DynamoProductsStore,
        store::{ProductsStore, TimeoutStore},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("products table name must not be empty")]
    MissingTableName,
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub dispatcher: Dispatcher,
}

impl AppContext {
    /// Build application context backed by DynamoDB.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration names no table.
    pub async fn from_config(config: &StoreConfig) -> Result<Self, AppInitError> {
        validate(config)?;

        let client = config.dynamodb_client().await;

        info!(
            table = %config.table_name,
            region = %config.region,
            key_schema = ?config.key_schema,
            "using dynamodb products store"
        );

        Self::from_store(config, Arc::new(DynamoProductsStore::new(client, &config.table_name)))
    }

    /// Build application context around an existing store.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration names no table.
    pub fn from_store(
        config: &StoreConfig,
        store: Arc<dyn ProductsStore>,
    ) -> Result<Self, AppInitError> {
        validate(config)?;

        let store: Arc<dyn ProductsStore> = match config.store_timeout() {
            Some(timeout) => Arc::new(TimeoutStore::new(store, timeout)),
            None => store,
        };

        let products: Arc<dyn ProductsService> = Arc::new(StoreProductsService::new(
            store,
            config.key_schema.resolver(),
            config.marker_format,
        ));

        let dispatcher = Dispatcher::new(
            Arc::clone(&products),
            config.validation,
            ResponseBuilder::new(config.status_policy),
        );

        Ok(Self {
            products,
            dispatcher,
        })
    }
}

fn validate(config: &StoreConfig) -> Result<(), AppInitError> {
    if config.table_name.trim().is_empty() {
        return Err(AppInitError::MissingTableName);
    }

    Ok(())
}
