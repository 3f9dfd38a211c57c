//! # relay-proto
//!
//! Wire-level pieces of the relay protocol: newline framing, the `/command`
//! sublanguage, and the fixed server reply lines.
//!
//! The protocol is deliberately tiny. Clients send UTF-8 lines terminated by
//! `\n` (a preceding `\r` is tolerated); the server answers with lines
//! terminated by `\r\n`. A line whose first character is `/` is a command.
//!
//! ```rust
//! use relay_proto::{CommandLine, reply};
//!
//! let cmd = CommandLine::parse("/register bob secret").unwrap();
//! assert_eq!(cmd.keyword, "register");
//! assert_eq!(cmd.args, vec!["bob", "secret"]);
//!
//! assert_eq!(reply::broadcast("bob: ", "hi"), "bob: hi");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod line;
pub mod reply;

pub use command::{CommandLine, is_command};
pub use error::ProtocolError;
pub use line::LineCodec;

/// Terminator appended to every server-originated line.
pub const LINE_TERMINATOR: &str = "\r\n";

/// First character of a command line.
pub const COMMAND_SIGIL: char = '/';

/// Separator between a sender's nickname and the relayed payload.
pub const NICK_DELIMITER: &str = ": ";
