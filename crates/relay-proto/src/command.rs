//! The `/command` sublanguage.
//!
//! A command line is any payload whose first character is [`COMMAND_SIGIL`].
//! The body after the sigil is split on single spaces: `"/nick  bob"` yields
//! three tokens (`nick`, ``, `bob`), which matters because handlers check
//! exact token counts.

use crate::COMMAND_SIGIL;

/// Returns `true` if the payload should be routed to the command interpreter.
#[inline]
pub fn is_command(payload: &str) -> bool {
    payload.starts_with(COMMAND_SIGIL)
}

/// A tokenized command line, borrowing from the raw payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine<'a> {
    /// Everything after the sigil, untouched.
    pub body: &'a str,
    /// First token (case-sensitive).
    pub keyword: &'a str,
    /// Remaining tokens, in order.
    pub args: Vec<&'a str>,
}

impl<'a> CommandLine<'a> {
    /// Parse a payload into a command line.
    ///
    /// Returns `None` if the payload is not a command or is the bare sigil.
    pub fn parse(payload: &'a str) -> Option<Self> {
        let body = payload.strip_prefix(COMMAND_SIGIL)?;
        if body.is_empty() {
            return None;
        }

        let mut tokens = body.split(' ');
        let keyword = tokens.next()?;
        Some(Self {
            body,
            keyword,
            args: tokens.collect(),
        })
    }

    /// Total token count, keyword included.
    pub fn token_count(&self) -> usize {
        self.args.len() + 1
    }
}
