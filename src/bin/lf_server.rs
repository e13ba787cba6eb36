//! MST server dispatching work to a Leader-Follower thread pool.

use anyhow::{Context, Result};
use spantree::server::config::ServerConfig;
use spantree::server::hub::{Dispatcher, Server};

const DEFAULT_PORT: u16 = 9036;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut config = ServerConfig::load(DEFAULT_PORT);
    if let Some(port) = std::env::args().nth(1) {
        config.port = port.parse().context("invalid port argument")?;
    }

    let dispatcher = Dispatcher::leader_follower(config.workers);
    let server = Server::bind(&config, dispatcher, "Welcome to the LF-server!\n")
        .await
        .context("failed to bind listener")?;
    server.run_until_shutdown().await?;
    Ok(())
}
