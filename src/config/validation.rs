//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("limits.min_nick_len must be at least 1")]
    ZeroMinNickLen,
    #[error("limits.max_line_len must be at least {min}, got {got}")]
    MaxLineLenTooSmall { min: usize, got: usize },
    #[error("limits.outbound_queue must be at least {min}, got {got}")]
    OutboundQueueTooSmall { min: usize, got: usize },
    #[error("limits.command_workers must be at least 1")]
    ZeroCommandWorkers,
    #[error("limits.write_timeout_ms must be at least 1")]
    ZeroWriteTimeout,
    #[error("server.metrics_port {0} collides with the listen port")]
    MetricsPortCollision(u16),
    #[error("invalid argon2 parameters: {0}")]
    Argon2Params(String),
}

/// Smallest line limit that still fits a `/register` with sensible arguments.
const MIN_LINE_LEN: usize = 64;

/// Room for the two greeting lines queued before the writer drains anything.
const MIN_OUTBOUND_QUEUE: usize = 2;

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let limits = &config.limits;

    if limits.min_nick_len == 0 {
        errors.push(ValidationError::ZeroMinNickLen);
    }
    if limits.max_line_len < MIN_LINE_LEN {
        errors.push(ValidationError::MaxLineLenTooSmall {
            min: MIN_LINE_LEN,
            got: limits.max_line_len,
        });
    }
    if limits.outbound_queue < MIN_OUTBOUND_QUEUE {
        errors.push(ValidationError::OutboundQueueTooSmall {
            min: MIN_OUTBOUND_QUEUE,
            got: limits.outbound_queue,
        });
    }
    if limits.command_workers == 0 {
        errors.push(ValidationError::ZeroCommandWorkers);
    }
    if limits.write_timeout_ms == 0 {
        errors.push(ValidationError::ZeroWriteTimeout);
    }

    if let Some(port) = config.server.metrics_port
        && port != 0
        && port == config.listen.address.port()
    {
        errors.push(ValidationError::MetricsPortCollision(port));
    }

    let security = &config.security;
    if let Err(e) = argon2::Params::new(
        security.argon2_memory_kib,
        security.argon2_iterations,
        security.argon2_parallelism,
        None,
    ) {
        errors.push(ValidationError::Argon2Params(e.to_string()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
