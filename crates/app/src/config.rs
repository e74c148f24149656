//! Products store configuration.

use std::time::Duration;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::Client;
use clap::Args;

use crate::{
    gateway::StatusPolicy,
    products::{codec::ValidationPolicy, keys::KeySchema, models::MarkerFormat},
};

pub const DEFAULT_REGION: &str = "us-east-2";

/// Products store and handler policy settings.
#[derive(Debug, Clone, Args)]
pub struct StoreConfig {
    /// AWS region hosting the products table
    #[arg(long, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// DynamoDB table holding products
    #[arg(long = "table", env = "PRODUCTS_TABLE")]
    pub table_name: String,

    /// Endpoint override, e.g. for DynamoDB Local
    #[arg(long, env = "DYNAMODB_ENDPOINT")]
    pub endpoint_url: Option<String>,

    /// Primary key layout of the products table
    #[arg(long, env = "PRODUCTS_KEY_SCHEMA", value_enum, default_value_t = KeySchema::Simple)]
    pub key_schema: KeySchema,

    /// Representation of the last-modified marker
    #[arg(long, env = "DATE_MARKER_FORMAT", value_enum, default_value_t = MarkerFormat::EpochSeconds)]
    pub marker_format: MarkerFormat,

    /// Validation applied to product payloads
    #[arg(long, env = "PRODUCT_VALIDATION", value_enum, default_value_t = ValidationPolicy::Lenient)]
    pub validation: ValidationPolicy,

    /// Status codes used for failures
    #[arg(long, env = "STATUS_POLICY", value_enum, default_value_t = StatusPolicy::Legacy)]
    pub status_policy: StatusPolicy,

    /// Per-call store timeout in milliseconds
    #[arg(long, env = "STORE_TIMEOUT_MS")]
    pub store_timeout_ms: Option<u64>,
}

impl StoreConfig {
    /// Default settings for the given table.
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            table_name: table_name.into(),
            endpoint_url: None,
            key_schema: KeySchema::default(),
            marker_format: MarkerFormat::default(),
            validation: ValidationPolicy::default(),
            status_policy: StatusPolicy::default(),
            store_timeout_ms: None,
        }
    }

    #[must_use]
    pub fn store_timeout(&self) -> Option<Duration> {
        self.store_timeout_ms.map(Duration::from_millis)
    }

    /// Build a DynamoDB client for the configured region and endpoint.
    pub async fn dynamodb_client(&self) -> Client {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);

        if let Some(endpoint_url) = &self.endpoint_url {
            builder = builder.endpoint_url(endpoint_url);
        }

        Client::from_conf(builder.build())
    }
}
