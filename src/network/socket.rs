//! Per-transport socket options, applied once when a connection is built.

use std::io;
use tokio::io::DuplexStream;
use tokio::net::TcpStream;

/// Transport-specific setup a [`Connection`](super::Connection) requires.
pub trait TransportTuning {
    /// Apply the send-coalescing preference. `nodelay = true` disables
    /// Nagle's algorithm where the transport has one.
    fn tune(&self, nodelay: bool) -> io::Result<()>;
}

impl TransportTuning for TcpStream {
    fn tune(&self, nodelay: bool) -> io::Result<()> {
        self.set_nodelay(nodelay)
    }
}

/// In-memory pipes have nothing to tune.
impl TransportTuning for DuplexStream {
    fn tune(&self, _nodelay: bool) -> io::Result<()> {
        Ok(())
    }
}
