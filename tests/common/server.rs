//! Test server management.
//!
//! Runs a relay in-process on an ephemeral loopback port with cheap password
//! hashing and a short eviction grace period.

use relayd::config::SecurityConfig;
use relayd::state::Hub;
use relayd::{Config, Server};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A test server instance. The relay stops when this is dropped.
pub struct TestServer {
    addr: SocketAddr,
    hub: Arc<Hub>,
    task: JoinHandle<anyhow::Result<()>>,
}

impl TestServer {
    /// Spawn a relay with test defaults.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with(|_| {}).await
    }

    /// Spawn a relay, letting the caller adjust the configuration first.
    pub async fn spawn_with<F>(customize: F) -> anyhow::Result<Self>
    where
        F: FnOnce(&mut Config),
    {
        let mut config = Config::default();
        config.listen.address = "127.0.0.1:0".parse()?;
        config.limits.eviction_grace_ms = 100;
        config.limits.write_timeout_ms = 1000;
        config.security = SecurityConfig {
            argon2_memory_kib: 256,
            argon2_iterations: 1,
            argon2_parallelism: 1,
        };
        customize(&mut config);

        let server = Server::bind(&config).await?;
        let addr = server.local_addr()?;
        let hub = Arc::clone(server.hub());
        let task = tokio::spawn(server.run());

        Ok(Self { addr, hub, task })
    }

    /// Get the server address for client connections.
    pub fn address(&self) -> String {
        self.addr.to_string()
    }

    /// Shared relay state, for asserting on the registry and directory.
    #[allow(dead_code)]
    pub fn hub(&self) -> &Arc<Hub> {
        &self.hub
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
