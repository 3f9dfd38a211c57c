//! Password hashing configuration.

use serde::Deserialize;

/// Argon2id cost parameters for registered nickname passwords.
///
/// Defaults follow the `argon2` crate's recommended parameters. Only new
/// hashes use these values; verification reads the parameters stored in
/// each hash.
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Memory cost in KiB (default: 19456).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,
    /// Number of passes (default: 2).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
    /// Degree of parallelism (default: 1).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

fn default_argon2_memory_kib() -> u32 {
    argon2::Params::DEFAULT_M_COST
}

fn default_argon2_iterations() -> u32 {
    argon2::Params::DEFAULT_T_COST
}

fn default_argon2_parallelism() -> u32 {
    argon2::Params::DEFAULT_P_COST
}
