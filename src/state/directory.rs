//! Nickname directory: password-protected nickname claims.
//!
//! The claim protocol is multi-step (check, create or verify, evict,
//! assign), so element-level map safety is not enough. The whole map sits
//! behind one async mutex and callers keep the [`DirectoryGuard`] for the
//! entire sequence. Records live for the life of the process and are never
//! overwritten.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};

/// Directory mutation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("nickname already registered: {0}")]
    AlreadyRegistered(String),
}

/// A claimed nickname and the Argon2 PHC hash of its password.
#[derive(Clone)]
pub struct RegisteredNick {
    nickname: String,
    password_hash: String,
}

impl RegisteredNick {
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

impl fmt::Debug for RegisteredNick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredNick")
            .field("nickname", &self.nickname)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Process-lifetime store of registered nicknames.
#[derive(Debug, Default)]
pub struct NickDirectory {
    records: Mutex<HashMap<String, RegisteredNick>>,
}

impl NickDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take exclusive access to the directory.
    pub async fn lock(&self) -> DirectoryGuard<'_> {
        DirectoryGuard {
            records: self.records.lock().await,
        }
    }

    /// One-shot registered check. Holding [`NickDirectory::lock`] is
    /// required when the answer feeds a mutation.
    pub async fn is_registered(&self, nickname: &str) -> bool {
        self.lock().await.is_registered(nickname)
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }
}

/// Exclusive view of the directory; dropping it releases the lock.
pub struct DirectoryGuard<'a> {
    records: MutexGuard<'a, HashMap<String, RegisteredNick>>,
}

impl DirectoryGuard<'_> {
    pub fn is_registered(&self, nickname: &str) -> bool {
        self.records.contains_key(nickname)
    }

    pub fn get(&self, nickname: &str) -> Option<&RegisteredNick> {
        self.records.get(nickname)
    }

    /// Record a new claim. Existing records are never replaced.
    pub fn insert(&mut self, nickname: &str, password_hash: String) -> Result<(), DirectoryError> {
        if self.records.contains_key(nickname) {
            return Err(DirectoryError::AlreadyRegistered(nickname.to_string()));
        }
        self.records.insert(
            nickname.to_string(),
            RegisteredNick {
                nickname: nickname.to_string(),
                password_hash,
            },
        );
        crate::metrics::set_registered_nicks(self.records.len());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
