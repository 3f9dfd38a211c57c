//! Session identifier generation.

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique session identifier, assigned at accept time.
pub type SessionId = u64;

/// Hands out monotonically increasing session ids.
///
/// Ids start at 1 so the first guest is `GUEST001`.
#[derive(Debug)]
pub struct SessionIdGenerator {
    counter: AtomicU64,
}

const ID_COUNTER_START: u64 = 1;

impl SessionIdGenerator {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(ID_COUNTER_START),
        }
    }

    /// Generate the next unique id.
    pub fn next(&self) -> SessionId {
        self.counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for SessionIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Default nickname for a session: `GUEST` plus the id, zero-padded to 3 digits.
pub fn guest_nickname(id: SessionId) -> String {
    format!("GUEST{id:03}")
}
