//! Router - the single consumer of inbound line events.
//!
//! Ingress tasks push one [`Event`] per non-empty line onto an unbounded
//! queue. The router takes them in arrival order: plain lines are broadcast
//! inline, command lines run on spawned tasks gated by a semaphore sized by
//! `limits.command_workers`. When every permit is out the router waits,
//! which holds back the whole queue rather than dropping commands.

use crate::handlers::{self, CommandRegistry};
use crate::state::{Hub, SessionId};
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, info, instrument};

/// One line read from a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub sender: SessionId,
    pub payload: String,
}

pub type EventSender = mpsc::UnboundedSender<Event>;

pub struct Router {
    hub: Arc<Hub>,
    commands: Arc<CommandRegistry>,
    workers: Arc<Semaphore>,
    events: mpsc::UnboundedReceiver<Event>,
}

impl Router {
    /// Create the router and the sending half of its event queue.
    pub fn new(hub: Arc<Hub>) -> (Self, EventSender) {
        let (tx, rx) = mpsc::unbounded_channel();
        let workers = Arc::new(Semaphore::new(hub.limits.command_workers.max(1)));
        let router = Self {
            hub,
            commands: Arc::new(CommandRegistry::new()),
            workers,
            events: rx,
        };
        (router, tx)
    }

    /// Consume events until every sender is gone.
    #[instrument(skip(self), name = "router")]
    pub async fn run(mut self) {
        info!(
            command_workers = self.workers.available_permits(),
            "Router started"
        );
        while let Some(event) = self.events.recv().await {
            self.route(event).await;
        }
        info!("Event queue closed, router stopping");
    }

    async fn route(&self, event: Event) {
        if !relay_proto::is_command(&event.payload) {
            handlers::broadcast(&self.hub.registry, event.sender, &event.payload);
            return;
        }

        let Ok(permit) = Arc::clone(&self.workers).acquire_owned().await else {
            debug!("Command semaphore closed");
            return;
        };
        let hub = Arc::clone(&self.hub);
        let commands = Arc::clone(&self.commands);
        tokio::spawn(async move {
            let _permit = permit;
            let _ = commands.dispatch(&hub, event.sender, &event.payload).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_hub;
    use std::time::Duration;
    use tokio::time::timeout;

    fn event(sender: SessionId, payload: &str) -> Event {
        Event {
            sender,
            payload: payload.to_string(),
        }
    }

    #[tokio::test]
    async fn routes_plain_lines_and_commands() {
        let hub = test_hub();
        let (a, _oa) = hub.registry.create();
        let (b, mut ob) = hub.registry.create();
        let (router, tx) = Router::new(Arc::clone(&hub));
        let task = tokio::spawn(router.run());

        tx.send(event(a.id(), "hello")).unwrap();
        tx.send(event(b.id(), "/nick frank")).unwrap();

        let first = timeout(Duration::from_secs(2), ob.lines.recv()).await.unwrap();
        assert_eq!(first.as_deref(), Some("GUEST001: hello"));
        let second = timeout(Duration::from_secs(2), ob.lines.recv()).await.unwrap();
        assert_eq!(
            second.as_deref(),
            Some("Your nickname has been changed to frank")
        );

        drop(tx);
        timeout(Duration::from_secs(2), task).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn single_worker_runs_commands_in_order() {
        let hub = test_hub();
        let (a, mut oa) = hub.registry.create();
        let (router, tx) = Router::new(Arc::clone(&hub));
        tokio::spawn(router.run());

        tx.send(event(a.id(), "/register alpha one")).unwrap();
        tx.send(event(a.id(), "/nick bravo")).unwrap();
        tx.send(event(a.id(), "/nick charlie")).unwrap();

        let mut seen = Vec::new();
        for _ in 0..3 {
            let line = timeout(Duration::from_secs(5), oa.lines.recv())
                .await
                .unwrap()
                .unwrap();
            seen.push(line.to_string());
        }
        assert_eq!(
            seen,
            vec![
                "Your nickname has been changed to alpha",
                "Your nickname has been changed to bravo",
                "Your nickname has been changed to charlie",
            ]
        );
        assert_eq!(a.nickname(), "charlie");
    }
}
