//! Server-originated lines.
//!
//! Every string here is sent without its terminator; [`crate::LineCodec`]
//! appends `\r\n` on the way out.

use crate::NICK_DELIMITER;

/// Sent when a nickname is shorter than the minimum length.
pub const INVALID_NICKNAME: &str = "Invalid Nickname.";

/// Sent when `/nick` targets a registered nickname.
pub const NICKNAME_RESERVED: &str = "Nickname not changed because it is reserved.";

/// Sent for an unrecognized command keyword.
pub const INVALID_COMMAND: &str = "Invalid Command.";

/// Reason given to sessions evicted by a new registration.
pub const REASON_NICK_REGISTERED: &str = "Nickname has been registered by another user.";

/// `ONLINE NOW: a,b,c`
pub fn online_now(summary: &str) -> String {
    format!("ONLINE NOW: {summary}")
}

/// Greeting sent right after the online list.
pub fn welcome(nickname: &str) -> String {
    format!("Welcome! Your nickname is: {nickname}")
}

/// Confirmation after a successful `/nick` or `/register`.
pub fn nickname_changed(nickname: &str) -> String {
    format!("Your nickname has been changed to {nickname}")
}

/// Notice delivered just before a forced disconnect.
pub fn disconnected(reason: &str) -> String {
    format!("The server has disconnected you. {reason}")
}

/// The cached display prefix for a nickname (`nick: `).
pub fn display_prefix(nickname: &str) -> String {
    let mut prefix = String::with_capacity(nickname.len() + NICK_DELIMITER.len());
    prefix.push_str(nickname);
    prefix.push_str(NICK_DELIMITER);
    prefix
}

/// A relayed line: the sender's display prefix followed by the payload.
pub fn broadcast(prefix: &str, payload: &str) -> String {
    let mut line = String::with_capacity(prefix.len() + payload.len());
    line.push_str(prefix);
    line.push_str(payload);
    line
}
