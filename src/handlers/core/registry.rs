//! Command handler registry and dispatch.
//!
//! The `CommandRegistry` manages command handlers and provides command usage
//! statistics. Every dispatch is instrumented with a span and a latency timer.

use super::context::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{NickHandler, RegisterHandler};
use crate::state::{Hub, SessionId};
use crate::telemetry::{CommandTimer, spans};
use relay_proto::CommandLine;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{Instrument, debug, warn};

/// Registry of command handlers.
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Box<dyn Handler>>,
    /// Command usage counters.
    command_counts: HashMap<&'static str, AtomicU64>,
}

impl CommandRegistry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let mut handlers: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();

        handlers.insert("nick", Box::new(NickHandler));
        handlers.insert("register", Box::new(RegisterHandler));

        let command_counts = handlers
            .keys()
            .map(|&cmd| (cmd, AtomicU64::new(0)))
            .collect();

        Self {
            handlers,
            command_counts,
        }
    }

    /// Command usage statistics, most used first. Unused commands are omitted.
    pub fn command_stats(&self) -> Vec<(&'static str, u64)> {
        let mut stats: Vec<_> = self
            .command_counts
            .iter()
            .map(|(cmd, count)| (*cmd, count.load(Ordering::Relaxed)))
            .filter(|(_, count)| *count > 0)
            .collect();

        stats.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        stats
    }

    /// Run the command in `payload` on behalf of session `sender`.
    ///
    /// Errors are mapped to their client reply (if any), logged and counted
    /// here; the returned result is informational.
    pub async fn dispatch(&self, hub: &Arc<Hub>, sender: SessionId, payload: &str) -> HandlerResult {
        let Some(session) = hub.registry.lookup(sender) else {
            warn!(id = sender, "Dropping command from session that is not online");
            crate::metrics::record_command_error("none", "not_online");
            return Err(HandlerError::NotOnline(sender));
        };
        let ctx = Context::new(hub, &session);

        // A bare sigil carries no keyword and is ignored.
        let Some(cmd) = CommandLine::parse(payload) else {
            debug!(id = sender, "Ignoring empty command");
            return Ok(());
        };
        let keyword = cmd.keyword;

        let Some((&name, handler)) = self.handlers.get_key_value(keyword) else {
            debug!(id = sender, keyword, "Unknown command");
            crate::metrics::record_command_error("unknown", "unknown_command");
            let err = HandlerError::UnknownCommand(keyword.to_string());
            if let Some(line) = err.client_reply() {
                ctx.reply(line);
            }
            return Err(err);
        };

        if let Some(counter) = self.command_counts.get(name) {
            counter.fetch_add(1, Ordering::Relaxed);
        }

        let span = spans::command(name, sender, &session.nickname());
        let _timer = CommandTimer::new(name);

        let result = handler.handle(&ctx, &cmd).instrument(span).await;

        if let Err(ref e) = result {
            crate::metrics::record_command_error(name, e.error_code());
            match e {
                HandlerError::Password(_) | HandlerError::Directory(_) => {
                    warn!(id = sender, command = name, error = %e, "Command failed");
                }
                _ => debug!(id = sender, command = name, error = %e, "Command error"),
            }
            if let Some(line) = e.client_reply() {
                ctx.reply(line);
            }
        }

        result
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Outbox, test_hub};

    fn drain(outbox: &mut Outbox) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(line) = outbox.lines.try_recv() {
            lines.push(line.to_string());
        }
        lines
    }

    #[tokio::test]
    async fn unknown_keyword_gets_invalid_command() {
        let hub = test_hub();
        let registry = CommandRegistry::new();
        let (session, mut outbox) = hub.registry.create();

        let result = registry.dispatch(&hub, session.id(), "/dance now").await;

        assert!(matches!(result, Err(HandlerError::UnknownCommand(ref k)) if k == "dance"));
        assert_eq!(drain(&mut outbox), vec!["Invalid Command."]);
    }

    #[tokio::test]
    async fn keyword_is_case_sensitive() {
        let hub = test_hub();
        let registry = CommandRegistry::new();
        let (session, mut outbox) = hub.registry.create();

        let result = registry.dispatch(&hub, session.id(), "/NICK frank").await;

        assert!(matches!(result, Err(HandlerError::UnknownCommand(_))));
        assert_eq!(drain(&mut outbox), vec!["Invalid Command."]);
        assert_eq!(session.nickname(), "GUEST001");
    }

    #[tokio::test]
    async fn bare_sigil_is_ignored() {
        let hub = test_hub();
        let registry = CommandRegistry::new();
        let (session, mut outbox) = hub.registry.create();

        assert!(registry.dispatch(&hub, session.id(), "/").await.is_ok());

        assert!(drain(&mut outbox).is_empty());
        assert!(registry.command_stats().is_empty());
    }

    #[tokio::test]
    async fn empty_keyword_is_an_invalid_command() {
        let hub = test_hub();
        let registry = CommandRegistry::new();
        let (session, mut outbox) = hub.registry.create();

        let _ = registry.dispatch(&hub, session.id(), "/ nick").await;

        assert_eq!(drain(&mut outbox), vec!["Invalid Command."]);
    }

    #[tokio::test]
    async fn offline_sender_is_dropped() {
        let hub = test_hub();
        let registry = CommandRegistry::new();
        let (session, mut outbox) = hub.registry.create();
        hub.registry.remove(session.id());

        let result = registry.dispatch(&hub, session.id(), "/nick frank").await;

        assert!(matches!(result, Err(HandlerError::NotOnline(_))));
        assert!(drain(&mut outbox).is_empty());
        assert_eq!(session.nickname(), "GUEST001");
    }

    #[tokio::test]
    async fn wrong_token_count_is_silent() {
        let hub = test_hub();
        let registry = CommandRegistry::new();
        let (session, mut outbox) = hub.registry.create();

        let result = registry.dispatch(&hub, session.id(), "/nick frank extra").await;

        assert!(matches!(
            result,
            Err(HandlerError::WrongArgCount { expected: 2, got: 3 })
        ));
        assert!(drain(&mut outbox).is_empty());
    }

    #[tokio::test]
    async fn counts_successful_and_failed_dispatches() {
        let hub = test_hub();
        let registry = CommandRegistry::new();
        let (session, _outbox) = hub.registry.create();

        let _ = registry.dispatch(&hub, session.id(), "/nick frank").await;
        let _ = registry.dispatch(&hub, session.id(), "/nick abc").await;
        let _ = registry.dispatch(&hub, session.id(), "/bogus").await;

        assert_eq!(registry.command_stats(), vec![("nick", 2)]);
    }
}
