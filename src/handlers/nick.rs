//! `/nick <name>`: casual rename to any unregistered nickname.

use super::core::context::{Context, Handler, expect_tokens};
use crate::error::{HandlerError, HandlerResult};
use async_trait::async_trait;
use relay_proto::CommandLine;

pub struct NickHandler;

#[async_trait]
impl Handler for NickHandler {
    async fn handle(&self, ctx: &Context<'_>, cmd: &CommandLine<'_>) -> HandlerResult {
        expect_tokens(cmd, 2)?;
        let nickname = cmd.args[0];
        ctx.check_nickname(nickname)?;

        // Held until the rename lands so a registration of the same name
        // cannot slip in between the check and the assignment.
        let directory = ctx.hub.directory.lock().await;
        ctx.ensure_online()?;
        if directory.is_registered(nickname) {
            return Err(HandlerError::NicknameReserved(nickname.to_string()));
        }

        ctx.assign_nickname(nickname);
        Ok(())
    }
}
