//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::limits::LimitsConfig;
use super::listen::ListenConfig;
use super::security::SecurityConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Relay configuration.
///
/// Every section is optional; an empty file yields the same settings as
/// [`Config::default`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server identity and auxiliary endpoints.
    #[serde(default)]
    pub server: ServerConfig,
    /// Network listen configuration.
    #[serde(default)]
    pub listen: ListenConfig,
    /// Queue sizes, timeouts and nickname rules.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Password hashing parameters.
    #[serde(default)]
    pub security: SecurityConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Default configuration listening on all interfaces at `port`.
    pub fn with_port(port: u16) -> Self {
        let mut config = Self::default();
        config.listen.address.set_port(port);
        config
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Name used in log output.
    #[serde(default = "default_server_name")]
    pub name: String,
    /// Prometheus metrics HTTP port. Absent or 0 disables the endpoint.
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            metrics_port: None,
        }
    }
}

fn default_server_name() -> String {
    "relayd".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.name, "relayd");
        assert_eq!(config.server.metrics_port, None);
        assert_eq!(config.listen.address.port(), 8085);
        assert_eq!(config.limits.min_nick_len, 4);
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let toml_str = r#"
            [server]
            name = "relay.example"
            metrics_port = 9100

            [limits]
            min_nick_len = 6
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.name, "relay.example");
        assert_eq!(config.server.metrics_port, Some(9100));
        assert_eq!(config.limits.min_nick_len, 6);
        assert_eq!(config.limits.outbound_queue, 256);
    }

    #[test]
    fn with_port_overrides_only_the_port() {
        let config = Config::with_port(7000);
        assert_eq!(config.listen.address.port(), 7000);
        assert!(config.listen.address.ip().is_unspecified());
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [listen]
            address = "127.0.0.1:6000"
            tcp_nodelay = true
            "#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.listen.address.port(), 6000);
        assert!(config.listen.tcp_nodelay);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Config::load("/nonexistent/relayd.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn load_garbage_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[listen\naddress = 1").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
