//! Serve command for running the pulse server

use anyhow::Result;
use clap::Args;
use pulse_server::{PulseServer, ServerConfig};
use tracing::info;

/// Default port for the pulse server
pub const DEFAULT_PORT: u16 = 8000;
/// Default host for the pulse server
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let config = ServerConfig::new(args.host.clone(), args.port);

    info!("Starting pulse server on {}:{}", config.host, config.port);

    let server = PulseServer::new(config);
    server.run().await.map_err(Into::into)
}
