//! Telemetry utilities for command timing and span construction.

use std::time::Instant;

/// Guard for timing command execution and recording metrics.
///
/// Records command latency when dropped.
pub struct CommandTimer {
    command: &'static str,
    start: Instant,
}

impl CommandTimer {
    /// Start timing a command.
    pub fn new(command: &'static str) -> Self {
        Self {
            command,
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        crate::metrics::record_command(self.command, duration);
    }
}

/// Standardized span constructors.
pub mod spans {
    use crate::state::SessionId;
    use std::net::SocketAddr;
    use tracing::{Span, debug_span, info_span};

    /// Span covering a client connection from accept to teardown.
    pub fn connection(id: SessionId, addr: &SocketAddr) -> Span {
        info_span!("connection", id = id, addr = %addr)
    }

    /// Span covering one command execution.
    pub fn command(name: &str, id: SessionId, nickname: &str) -> Span {
        debug_span!("command", name = %name, id = id, nickname = %nickname)
    }
}
