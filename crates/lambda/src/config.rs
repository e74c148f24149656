//! Function configuration module

use clap::Parser;
use storefront_app::{config::StoreConfig, logging::LoggingConfig};

/// Storefront products function configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-lambda", about = "Storefront products function", long_about = None)]
pub struct FunctionConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Products store settings.
    #[command(flatten)]
    pub store: StoreConfig,
}

impl FunctionConfig {
    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
