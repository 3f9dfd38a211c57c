//! relayd - a text-line broadcast relay.
//!
//! Clients connect over TCP and send newline-terminated lines; every line is
//! rebroadcast to all other connected clients prefixed with the sender's
//! nickname. Lines starting with `/` are commands: `/nick <name>` renames the
//! session and `/register <name> <password>` claims a password-protected
//! nickname, evicting anyone else using it.

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod metrics;
pub mod network;
pub mod router;
pub mod security;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::Config;
pub use server::Server;
