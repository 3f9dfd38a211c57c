//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Top-level config struct and loading (Config, ServerConfig)
//! - [`listen`]: Network listener configuration (ListenConfig)
//! - [`limits`]: Queue sizes, timeouts and nickname rules (LimitsConfig)
//! - [`security`]: Password hashing cost (SecurityConfig)
//! - [`validation`]: Startup sanity checks

mod limits;
mod listen;
mod security;
mod types;
pub mod validation;

pub use limits::LimitsConfig;
pub use listen::ListenConfig;
pub use security::SecurityConfig;
pub use types::{Config, ConfigError, ServerConfig};
