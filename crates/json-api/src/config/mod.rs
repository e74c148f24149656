//! Server configuration module

use clap::Parser;

use storefront_app::{config::StoreConfig, logging::LoggingConfig};

use crate::config::server::ServerRuntimeConfig;

pub(crate) mod server;

/// Storefront local gateway configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-json", about = "Storefront products gateway", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Products store settings.
    #[command(flatten)]
    pub store: StoreConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
