//! Core handler infrastructure.
//!
//! The handler registry and the context handed to each handler.

pub mod context;
pub mod registry;

pub use context::{Context, Handler};
pub use registry::CommandRegistry;
