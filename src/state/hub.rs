//! The Hub - shared state handed to every relay task.
//!
//! The registry and the directory are the only contended resources. All
//! mutation goes through their methods; nothing reaches into their maps.

use crate::config::{Config, LimitsConfig};
use crate::security::{PasswordError, PasswordPolicy};
use crate::state::{NickDirectory, SessionRegistry};

pub struct Hub {
    /// Connected sessions.
    pub registry: SessionRegistry,
    /// Registered nickname claims.
    pub directory: NickDirectory,
    /// Hashing policy for new registrations.
    pub passwords: PasswordPolicy,
    pub limits: LimitsConfig,
}

impl Hub {
    pub fn new(config: &Config) -> Result<Self, PasswordError> {
        Ok(Self::with_policy(
            config.limits.clone(),
            PasswordPolicy::new(&config.security)?,
        ))
    }

    pub fn with_policy(limits: LimitsConfig, passwords: PasswordPolicy) -> Self {
        Self {
            registry: SessionRegistry::new(limits.outbound_queue, limits.eviction_grace()),
            directory: NickDirectory::new(),
            passwords,
            limits,
        }
    }
}

#[cfg(test)]
pub(crate) fn test_hub() -> std::sync::Arc<Hub> {
    let limits = LimitsConfig {
        eviction_grace_ms: 20,
        ..LimitsConfig::default()
    };
    std::sync::Arc::new(Hub::with_policy(
        limits,
        crate::security::password::fast_policy(),
    ))
}
