//! Relay command handlers.
//!
//! This module contains the Handler trait and command registry for dispatching
//! `/command` lines, plus the broadcast fan-out used for every other line.
//!
//! Handlers receive a [`CommandLine`](relay_proto::CommandLine) that borrows
//! from the event payload; arguments are plain `&str` slices.

mod core;
mod helpers;
mod nick;
mod register;

pub use self::core::{CommandRegistry, Context, Handler};
pub use helpers::fanout::broadcast;
pub use nick::NickHandler;
pub use register::RegisterHandler;
