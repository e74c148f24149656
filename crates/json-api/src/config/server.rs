//! Local gateway listener settings

use clap::Args;

/// Listener settings for the local gateway.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Address the gateway binds to
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port the gateway listens on
    #[arg(short, long, env = "SERVER_PORT", default_value = "8698")]
    pub port: u16,
}

impl ServerRuntimeConfig {
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
