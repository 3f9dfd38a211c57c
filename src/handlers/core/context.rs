//! Handler context and the `Handler` trait.

use crate::error::{HandlerError, HandlerResult};
use crate::state::{Hub, OutboundLine, Session};
use async_trait::async_trait;
use relay_proto::{CommandLine, reply};
use std::sync::Arc;
use tracing::{info, warn};

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// Shared relay state.
    pub hub: &'a Arc<Hub>,
    /// The session that issued the command.
    pub session: &'a Arc<Session>,
}

impl<'a> Context<'a> {
    pub fn new(hub: &'a Arc<Hub>, session: &'a Arc<Session>) -> Self {
        Self { hub, session }
    }

    /// Queue a line for the issuing client.
    ///
    /// Delivery failures are logged and counted; the writer task owns
    /// tearing the session down.
    pub fn reply(&self, line: impl Into<OutboundLine>) {
        if let Err(e) = self.session.send_line(line) {
            warn!(id = self.session.id(), error = %e, "Failed to queue reply");
            crate::metrics::record_delivery_failure(e.error_code());
        }
    }

    /// Reject nicknames shorter than the configured minimum.
    ///
    /// Length is counted in characters, not bytes.
    pub fn check_nickname(&self, nickname: &str) -> HandlerResult {
        if nickname.chars().count() < self.hub.limits.min_nick_len {
            return Err(HandlerError::InvalidNickname(nickname.to_string()));
        }
        Ok(())
    }

    /// Fail if the issuing session has left the registry.
    ///
    /// Call again after any await that may have let an eviction through,
    /// such as taking the directory lock.
    pub fn ensure_online(&self) -> HandlerResult {
        let id = self.session.id();
        if !self.hub.registry.contains(id) {
            return Err(HandlerError::NotOnline(id));
        }
        Ok(())
    }

    /// Give the issuing session a new nickname and confirm it.
    pub fn assign_nickname(&self, nickname: &str) {
        let old = self.session.nickname();
        self.session.set_nickname(nickname);
        info!(id = self.session.id(), old = %old, new = %nickname, "Nickname changed");
        self.reply(reply::nickname_changed(nickname));
    }
}

/// A handler for a single command keyword.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &Context<'_>, cmd: &CommandLine<'_>) -> HandlerResult;
}

/// Require an exact token count (keyword included).
pub(crate) fn expect_tokens(cmd: &CommandLine<'_>, expected: usize) -> HandlerResult {
    let got = cmd.token_count();
    if got != expected {
        return Err(HandlerError::WrongArgCount { expected, got });
    }
    Ok(())
}
