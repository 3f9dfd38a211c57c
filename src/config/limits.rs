//! Queue sizes, timeouts and nickname rules.

use serde::Deserialize;
use std::time::Duration;

/// Relay limits configuration.
///
/// These bound how much a slow or misbehaving peer can cost the rest of the
/// relay.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Minimum nickname length in characters (default: 4).
    #[serde(default = "default_min_nick_len")]
    pub min_nick_len: usize,
    /// Maximum inbound line length in bytes, terminator included (default: 8192).
    /// Longer lines disconnect the client.
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,
    /// Lines buffered per session before it is disconnected as too slow
    /// (default: 256, minimum: 2).
    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,
    /// Command events allowed to run at once (default: 1).
    /// With one worker, commands execute strictly in arrival order.
    #[serde(default = "default_command_workers")]
    pub command_workers: usize,
    /// Deadline for a single socket write, in milliseconds (default: 5000).
    #[serde(default = "default_write_timeout_ms")]
    pub write_timeout_ms: u64,
    /// Delay between an eviction notice and closing the socket, in milliseconds (default: 2000).
    #[serde(default = "default_eviction_grace_ms")]
    pub eviction_grace_ms: u64,
}

impl LimitsConfig {
    /// Socket write deadline.
    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    /// Grace period granted to an evicted session.
    pub fn eviction_grace(&self) -> Duration {
        Duration::from_millis(self.eviction_grace_ms)
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            min_nick_len: default_min_nick_len(),
            max_line_len: default_max_line_len(),
            outbound_queue: default_outbound_queue(),
            command_workers: default_command_workers(),
            write_timeout_ms: default_write_timeout_ms(),
            eviction_grace_ms: default_eviction_grace_ms(),
        }
    }
}

fn default_min_nick_len() -> usize {
    4
}

fn default_max_line_len() -> usize {
    relay_proto::line::DEFAULT_MAX_LINE_LEN
}

fn default_outbound_queue() -> usize {
    256
}

fn default_command_workers() -> usize {
    1
}

fn default_write_timeout_ms() -> u64 {
    5000
}

fn default_eviction_grace_ms() -> u64 {
    2000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_correct() {
        let config = LimitsConfig::default();
        assert_eq!(config.min_nick_len, 4);
        assert_eq!(config.max_line_len, 8192);
        assert_eq!(config.outbound_queue, 256);
        assert_eq!(config.command_workers, 1);
        assert_eq!(config.write_timeout(), Duration::from_secs(5));
        assert_eq!(config.eviction_grace(), Duration::from_secs(2));
    }

    #[test]
    fn partial_table_keeps_other_defaults() {
        let cfg: LimitsConfig = toml::from_str("eviction_grace_ms = 50").unwrap();
        assert_eq!(cfg.eviction_grace(), Duration::from_millis(50));
        assert_eq!(cfg.min_nick_len, 4);
    }
}
