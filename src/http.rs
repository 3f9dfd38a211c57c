//! `/metrics` endpoint for Prometheus scraping.
//!
//! Bound before the relay starts so a port clash fails startup instead of
//! surfacing later in a background task.

use axum::{Router, routing::get};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};

/// A bound metrics endpoint, not yet serving.
pub struct MetricsServer {
    listener: TcpListener,
}

impl MetricsServer {
    pub async fn bind(addr: SocketAddr) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until the listener fails. Errors are logged, not returned, since
    /// the relay keeps running without its metrics.
    pub async fn run(self) {
        if let Ok(addr) = self.listener.local_addr() {
            info!(%addr, "Metrics endpoint listening");
        }
        if let Err(e) = axum::serve(self.listener, routes()).await {
            error!(error = %e, "Metrics endpoint failed");
        }
    }
}

fn routes() -> Router {
    Router::new().route("/metrics", get(|| async { crate::metrics::gather_metrics() }))
}
