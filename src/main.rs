//! relayd - text-line broadcast relay daemon.
//!
//! Usage: `relayd [PORT | CONFIG_PATH]`

use relayd::config::{Config, validation};
use relayd::http::MetricsServer;
use relayd::{Server, metrics};
use std::net::SocketAddr;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Loaded when no argument is given and the file exists.
const DEFAULT_CONFIG_PATH: &str = "relayd.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = load_config(std::env::args().nth(1))?;

    if let Err(errors) = validation::validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("configuration has {} error(s)", errors.len());
    }

    info!(
        server = %config.server.name,
        addr = %config.listen.address,
        "Starting relayd"
    );

    // Convention: absent or 0 disables the HTTP endpoint.
    match config.server.metrics_port {
        Some(port) if port != 0 => {
            metrics::init();
            let addr = SocketAddr::new(config.listen.address.ip(), port);
            let endpoint = MetricsServer::bind(addr).await.map_err(|e| {
                error!(%addr, error = %e, "Failed to bind metrics endpoint");
                e
            })?;
            tokio::spawn(endpoint.run());
        }
        _ => info!("Prometheus metrics disabled"),
    }

    let server = Server::bind(&config).await?;

    tokio::select! {
        result = server.run() => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
            Ok(())
        }
    }
}

/// A numeric argument is a listen port; anything else is a config path.
fn load_config(arg: Option<String>) -> anyhow::Result<Config> {
    match arg {
        Some(arg) => match arg.parse::<u16>() {
            Ok(port) => Ok(Config::with_port(port)),
            Err(_) => Config::load(&arg).map_err(|e| {
                error!(path = %arg, error = %e, "Failed to load config");
                e.into()
            }),
        },
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            Ok(Config::load(DEFAULT_CONFIG_PATH)?)
        }
        None => Ok(Config::default()),
    }
}
