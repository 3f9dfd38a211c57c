//! State management module.
//!
//! Contains the Hub (shared relay state) and the entities it owns.

mod dashmap_ext;
mod directory;
mod hub;
mod registry;
mod session;
mod uid;

pub use directory::{DirectoryError, DirectoryGuard, NickDirectory, RegisteredNick};
pub use hub::Hub;
#[cfg(test)]
pub(crate) use hub::test_hub;
pub use registry::SessionRegistry;
pub use session::{OutboundLine, Outbox, Session};
pub use uid::{SessionId, SessionIdGenerator, guest_nickname};
