//! Storefront Local Products Gateway

use std::process;

use salvo::{affix_state::inject, prelude::*, trailing_slash::remove_slash};
use tracing::{error, info};

use storefront_app::{context::AppContext, logging};

use crate::{config::ServerConfig, state::State};

mod config;
mod extensions;
mod healthcheck;
mod products;
mod request_logging;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Storefront local gateway entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
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

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(request_logging::request_logging)
        .hoop(inject(State::from_app_context(app)))
        .push(router::app_router());

    let server = Server::new(listener);

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;
}
