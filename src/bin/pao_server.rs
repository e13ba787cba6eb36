//! MST server dispatching work to a pipeline of active objects.

use anyhow::{Context, Result};
use spantree::server::config::ServerConfig;
use spantree::server::hub::{Dispatcher, Server};

const DEFAULT_PORT: u16 = 8080;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut config = ServerConfig::load(DEFAULT_PORT);
    if let Some(port) = std::env::args().nth(1) {
        config.port = port.parse().context("invalid port argument")?;
    }

    let dispatcher = Dispatcher::pipeline();
    let server = Server::bind(&config, dispatcher, "Welcome to the PAO-server!\n")
        .await
        .context("failed to bind listener")?;
    server.run_until_shutdown().await?;
    Ok(())
}
