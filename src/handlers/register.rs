//! `/register <name> <password>`: claim a password-protected nickname.
//!
//! The first registration of a name creates its directory record and evicts
//! every other online holder of the name. Later claims must present the
//! same password; a mismatch is logged but never answered, so a client
//! cannot guess the right password from replies.

use super::core::context::{Context, Handler, expect_tokens};
use crate::error::{HandlerError, HandlerResult};
use crate::security::password::verify_blocking;
use async_trait::async_trait;
use relay_proto::{CommandLine, reply};
use tracing::{info, warn};
use zeroize::Zeroizing;

pub struct RegisterHandler;

#[async_trait]
impl Handler for RegisterHandler {
    async fn handle(&self, ctx: &Context<'_>, cmd: &CommandLine<'_>) -> HandlerResult {
        expect_tokens(cmd, 3)?;
        let nickname = cmd.args[0];
        let password = Zeroizing::new(cmd.args[1].to_string());
        ctx.check_nickname(nickname)?;

        // The guard spans check, create or verify, evict and assign.
        let mut directory = ctx.hub.directory.lock().await;
        ctx.ensure_online()?;
        let stored = directory
            .get(nickname)
            .map(|record| record.password_hash().to_string());

        match stored {
            Some(stored) => {
                if !verify_blocking(password, stored).await? {
                    warn!(id = ctx.session.id(), nickname, "Registered nickname claimed with wrong password");
                    return Err(HandlerError::PasswordMismatch(nickname.to_string()));
                }
                info!(id = ctx.session.id(), nickname, "Registered nickname claimed");
            }
            None => {
                let hash = ctx.hub.passwords.hash_blocking(password).await?;
                directory.insert(nickname, hash)?;
                info!(id = ctx.session.id(), nickname, "Nickname registered");

                let evicted = ctx.hub.registry.evict_by_nickname(
                    nickname,
                    reply::REASON_NICK_REGISTERED,
                    Some(ctx.session.id()),
                );
                if !evicted.is_empty() {
                    info!(nickname, ?evicted, "Evicted previous holders");
                }
            }
        }

        ctx.assign_nickname(nickname);
        Ok(())
    }
}
