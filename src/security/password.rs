//! Password hashing and verification utilities.
//!
//! Centralizes Argon2 password handling for registered nicknames. Hashing is
//! CPU-bound, so the async entry points run it on the blocking pool.

use crate::config::SecurityConfig;
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::{SaltString, rand_core::OsRng},
};
use thiserror::Error;
use zeroize::Zeroizing;

/// Password hashing failures.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(argon2::password_hash::Error),
    #[error("invalid argon2 parameters: {0}")]
    Params(argon2::Error),
    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Argon2id hashing with configured cost parameters.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    params: Params,
}

impl PasswordPolicy {
    /// Build a policy from configuration.
    pub fn new(config: &SecurityConfig) -> Result<Self, PasswordError> {
        let params = Params::new(
            config.argon2_memory_kib,
            config.argon2_iterations,
            config.argon2_parallelism,
            None,
        )
        .map_err(PasswordError::Params)?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password with a fresh random salt, returning the PHC string.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Ok(self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(PasswordError::Hash)?
            .to_string())
    }

    /// Hash on the blocking pool.
    pub async fn hash_blocking(&self, password: Zeroizing<String>) -> Result<String, PasswordError> {
        let policy = self.clone();
        tokio::task::spawn_blocking(move || policy.hash_password(&password)).await?
    }
}

/// Verify a password against a stored PHC hash string.
///
/// Cost parameters are read from the hash itself, so hashes created under
/// an older policy keep verifying.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let hash = PasswordHash::new(stored).map_err(PasswordError::Hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &hash)
        .is_ok())
}

/// Verify on the blocking pool.
pub async fn verify_blocking(
    password: Zeroizing<String>,
    stored: String,
) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored)).await?
}

#[cfg(test)]
pub(crate) fn fast_policy() -> PasswordPolicy {
    PasswordPolicy::new(&SecurityConfig {
        argon2_memory_kib: 256,
        argon2_iterations: 1,
        argon2_parallelism: 1,
    })
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted_phc_string() {
        let policy = fast_policy();
        let a = policy.hash_password("secret").unwrap();
        let b = policy.hash_password("secret").unwrap();

        assert!(a.starts_with("$argon2id$"));
        assert!(!a.contains("secret"));
        assert_ne!(a, b);
    }

    #[test]
    fn verify_matches_only_the_right_password() {
        let policy = fast_policy();
        let hash = policy.hash_password("secret").unwrap();

        assert!(verify_password("secret", &hash).unwrap());
        assert!(!verify_password("wrongpass", &hash).unwrap());
    }

    #[test]
    fn verify_rejects_malformed_hash() {
        assert!(matches!(
            verify_password("secret", "not-a-phc-string"),
            Err(PasswordError::Hash(_))
        ));
    }

    #[test]
    fn bad_params_are_reported() {
        let err = PasswordPolicy::new(&SecurityConfig {
            argon2_memory_kib: 256,
            argon2_iterations: 0,
            argon2_parallelism: 1,
        })
        .unwrap_err();
        assert!(matches!(err, PasswordError::Params(_)));
    }

    #[tokio::test]
    async fn blocking_round_trip() {
        let policy = fast_policy();
        let hash = policy
            .hash_blocking(Zeroizing::new("hunter22".to_string()))
            .await
            .unwrap();

        assert!(
            verify_blocking(Zeroizing::new("hunter22".to_string()), hash)
                .await
                .unwrap()
        );
    }
}
