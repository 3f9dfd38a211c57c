//! Unified error handling for relayd.
//!
//! This module provides the error hierarchy for command handling and line
//! delivery, with client reply mapping and metric labeling.

use crate::security::PasswordError;
use crate::state::{DirectoryError, SessionId};
use relay_proto::reply;
use thiserror::Error;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("wrong argument count: expected {expected} tokens, got {got}")]
    WrongArgCount { expected: usize, got: usize },

    #[error("invalid nickname: {0}")]
    InvalidNickname(String),

    #[error("nickname is reserved: {0}")]
    NicknameReserved(String),

    #[error("password mismatch for {0}")]
    PasswordMismatch(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("session {0} is not online")]
    NotOnline(SessionId),

    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("password error: {0}")]
    Password(#[from] PasswordError),
}

impl HandlerError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::WrongArgCount { .. } => "wrong_arg_count",
            Self::InvalidNickname(_) => "invalid_nickname",
            Self::NicknameReserved(_) => "nickname_reserved",
            Self::PasswordMismatch(_) => "password_mismatch",
            Self::UnknownCommand(_) => "unknown_command",
            Self::NotOnline(_) => "not_online",
            Self::Directory(_) => "directory",
            Self::Password(_) => "password",
        }
    }

    /// The line sent back to the issuing client, if any.
    ///
    /// Malformed token counts and failed password checks are deliberately
    /// silent towards the client; they only reach the log.
    pub fn client_reply(&self) -> Option<&'static str> {
        match self {
            Self::InvalidNickname(_) => Some(reply::INVALID_NICKNAME),
            Self::NicknameReserved(_) => Some(reply::NICKNAME_RESERVED),
            Self::UnknownCommand(_) => Some(reply::INVALID_COMMAND),

            // These errors don't get client-visible replies
            Self::WrongArgCount { .. } => None,
            Self::PasswordMismatch(_) => None,
            Self::NotOnline(_) => None,
            Self::Directory(_) => None,
            Self::Password(_) => None,
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Delivery Errors (outbound queue)
// ============================================================================

/// Why a line could not be queued for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("outbound queue full")]
    QueueFull,

    #[error("session closed")]
    Closed,
}

impl DeliveryError {
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::QueueFull => "queue_full",
            Self::Closed => "closed",
        }
    }
}
