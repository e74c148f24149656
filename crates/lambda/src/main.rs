//! Storefront Products Lambda Function

use std::process;

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use tracing::{error, info};

use storefront_app::{context::AppContext, logging};

use crate::config::FunctionConfig;

mod config;
mod proxy;

#[tokio::main]
pub async fn main() -> Result<(), Error> {
    let config = FunctionConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(e) = logging::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Logging initialization error: {e}");
        }

        process::exit(1);
    }

    let app = match AppContext::from_config(&config.store).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    info!(table = %config.store.table_name, "products function starting");

    let dispatcher = &app.dispatcher;

    run(service_fn(
        move |event: LambdaEvent<_>| async move {
            proxy::handle(dispatcher, event).await.map_err(Error::from)
        },
    ))
    .await
}
