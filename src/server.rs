//! Server - wires the hub, router and gateway together.

use crate::config::Config;
use crate::network::Gateway;
use crate::router::Router;
use crate::state::Hub;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// A bound, not yet running relay.
pub struct Server {
    hub: Arc<Hub>,
    router: Router,
    gateway: Gateway,
}

impl Server {
    /// Build shared state and bind the listener from `config`.
    pub async fn bind(config: &Config) -> anyhow::Result<Self> {
        let hub = Arc::new(Hub::new(config)?);
        let (router, events) = Router::new(Arc::clone(&hub));
        let gateway = Gateway::bind(
            config.listen.address,
            config.listen.tcp_nodelay,
            Arc::clone(&hub),
            events,
        )
        .await?;

        Ok(Self {
            hub,
            router,
            gateway,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.gateway.local_addr()
    }

    pub fn hub(&self) -> &Arc<Hub> {
        &self.hub
    }

    /// Start the router and accept connections until the gateway fails.
    pub async fn run(self) -> anyhow::Result<()> {
        let router = tokio::spawn(self.router.run());
        info!(addr = %self.gateway.local_addr()?, "Relay running");

        let result = self.gateway.run().await;
        router.abort();
        result
    }
}
