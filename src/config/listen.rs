//! Network listener configuration.

use serde::Deserialize;
use std::net::{Ipv4Addr, SocketAddr};

/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 8085;

/// Network listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Address to bind to (e.g., "0.0.0.0:8085").
    #[serde(default = "default_address")]
    pub address: SocketAddr,
    /// Disable Nagle's algorithm on accepted sockets.
    ///
    /// Off by default: relayed lines are small and coalescing them is cheaper
    /// than one segment per line.
    #[serde(default)]
    pub tcp_nodelay: bool,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            tcp_nodelay: false,
        }
    }
}

fn default_address() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT))
}
