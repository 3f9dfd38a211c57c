//! Session registry: the live set of connected sessions.
//!
//! Backed by a `DashMap`, so insert/remove/lookup are safe from any task.
//! Enumeration works on a cloned snapshot: a session removed mid-broadcast
//! may still be visited, but its queue is closed by then and the send
//! fails cleanly.

use crate::state::dashmap_ext::DashMapExt;
use crate::state::session::{Outbox, Session};
use crate::state::uid::{SessionId, SessionIdGenerator};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Concurrent map from session id to session.
pub struct SessionRegistry {
    sessions: DashMap<SessionId, Arc<Session>>,
    ids: SessionIdGenerator,
    queue_capacity: usize,
    eviction_grace: Duration,
}

impl SessionRegistry {
    pub fn new(queue_capacity: usize, eviction_grace: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ids: SessionIdGenerator::new(),
            queue_capacity,
            eviction_grace,
        }
    }

    /// Allocate the next id, build a guest session and register it.
    ///
    /// The caller owns the returned [`Outbox`] and is expected to drain it
    /// into the transport. No greeting is queued here.
    pub fn create(&self) -> (Arc<Session>, Outbox) {
        let id = self.ids.next();
        let (session, outbox) = Session::new(id, self.queue_capacity);
        self.sessions.insert(id, Arc::clone(&session));
        crate::metrics::set_connected_sessions(self.sessions.len());
        (session, outbox)
    }

    /// Remove a session. Removing a non-member is a no-op.
    pub fn remove(&self, id: SessionId) -> Option<Arc<Session>> {
        let removed = self.sessions.remove(&id).map(|(_, session)| session);
        if removed.is_some() {
            crate::metrics::set_connected_sessions(self.sessions.len());
        }
        removed
    }

    pub fn lookup(&self, id: SessionId) -> Option<Arc<Session>> {
        self.sessions.get_cloned(&id)
    }

    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Visit every registered session once, in unspecified order.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&Arc<Session>),
    {
        for session in self.sessions.values_cloned() {
            visit(&session);
        }
    }

    /// Comma-joined nicknames of all registered sessions, ordered by id.
    pub fn online_summary(&self) -> String {
        let mut snapshot: Vec<(SessionId, String)> = self
            .sessions
            .iter()
            .map(|entry| (*entry.key(), entry.value().nickname()))
            .collect();
        snapshot.sort_unstable_by_key(|(id, _)| *id);

        snapshot
            .into_iter()
            .map(|(_, nickname)| nickname)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Forcibly disconnect every session holding exactly `nickname`,
    /// except `spare`.
    ///
    /// Removal from the registry happens before this returns. The notice is
    /// queued immediately and the session is closed after the grace period.
    /// Returns the evicted ids.
    pub fn evict_by_nickname(
        &self,
        nickname: &str,
        reason: &str,
        spare: Option<SessionId>,
    ) -> Vec<SessionId> {
        let holders: Vec<SessionId> = self
            .sessions
            .iter()
            .filter(|entry| Some(*entry.key()) != spare && entry.value().has_nickname(nickname))
            .map(|entry| *entry.key())
            .collect();

        let mut evicted = Vec::with_capacity(holders.len());
        for id in holders {
            // Re-check under the removal itself: the holder may have renamed
            // or left since the scan.
            let Some((_, session)) = self
                .sessions
                .remove_if(&id, |_, session| session.has_nickname(nickname))
            else {
                debug!(id, nickname, "Eviction target already gone");
                continue;
            };

            info!(id, nickname, reason, "Evicting session");
            self.disconnect(session, reason);
            evicted.push(id);
        }

        if !evicted.is_empty() {
            crate::metrics::set_connected_sessions(self.sessions.len());
            crate::metrics::record_evictions(evicted.len());
        }
        evicted
    }

    /// Deliver the notice, then close the session after the grace period.
    fn disconnect(&self, session: Arc<Session>, reason: &str) {
        if let Err(e) = session.send_line(relay_proto::reply::disconnected(reason)) {
            warn!(id = session.id(), error = %e, "Could not queue disconnect notice");
        }

        let grace = self.eviction_grace;
        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            session.close();
        });
    }
}
