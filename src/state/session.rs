//! Connection session: one per accepted client.
//!
//! A [`Session`] never touches the socket directly. Lines for the peer go
//! into a bounded queue drained by the connection's writer task, so a
//! producer never blocks on a slow peer and each queued item reaches the
//! wire as one whole line.

use crate::error::DeliveryError;
use crate::state::uid::{SessionId, guest_nickname};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

/// A line queued for delivery, shared between all recipients of a broadcast.
pub type OutboundLine = Arc<str>;

/// Nickname plus its cached display prefix; always updated together.
#[derive(Debug)]
struct Identity {
    nickname: String,
    display_prefix: Arc<str>,
}

impl Identity {
    fn new(nickname: String) -> Self {
        let display_prefix = relay_proto::reply::display_prefix(&nickname).into();
        Self {
            nickname,
            display_prefix,
        }
    }
}

/// One connected client and its identity state.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    identity: RwLock<Identity>,
    outbound: mpsc::Sender<OutboundLine>,
    closer: CancellationToken,
}

/// Receiving end of a session's outbound queue, owned by its writer task.
#[derive(Debug)]
pub struct Outbox {
    pub lines: mpsc::Receiver<OutboundLine>,
    pub closer: CancellationToken,
}

impl Session {
    /// Create a session with the default guest nickname.
    pub fn new(id: SessionId, queue_capacity: usize) -> (Arc<Self>, Outbox) {
        let (tx, rx) = mpsc::channel(queue_capacity.max(1));
        let closer = CancellationToken::new();
        let session = Arc::new(Self {
            id,
            identity: RwLock::new(Identity::new(guest_nickname(id))),
            outbound: tx,
            closer: closer.clone(),
        });
        let outbox = Outbox { lines: rx, closer };
        (session, outbox)
    }

    #[inline]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Current nickname (cloned; the lock is released on return).
    pub fn nickname(&self) -> String {
        self.identity.read().nickname.clone()
    }

    /// `nickname + ": "`, recomputed only when the nickname changes.
    pub fn display_prefix(&self) -> Arc<str> {
        Arc::clone(&self.identity.read().display_prefix)
    }

    /// Whether the session currently holds exactly `nickname`.
    pub fn has_nickname(&self, nickname: &str) -> bool {
        self.identity.read().nickname == nickname
    }

    /// Replace the nickname and its display prefix.
    pub fn set_nickname(&self, nickname: &str) {
        *self.identity.write() = Identity::new(nickname.to_string());
    }

    /// Queue a line for the peer without waiting.
    pub fn send_line(&self, line: impl Into<OutboundLine>) -> Result<(), DeliveryError> {
        if self.closer.is_cancelled() {
            return Err(DeliveryError::Closed);
        }
        self.outbound.try_send(line.into()).map_err(|e| match e {
            TrySendError::Full(_) => DeliveryError::QueueFull,
            TrySendError::Closed(_) => DeliveryError::Closed,
        })
    }

    /// Ask the connection to tear down. Idempotent.
    pub fn close(&self) {
        self.closer.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.closer.is_cancelled()
    }

    /// Resolves once [`Session::close`] has been called.
    pub fn closed(&self) -> WaitForCancellationFuture<'_> {
        self.closer.cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_as_guest() {
        let (session, _outbox) = Session::new(7, 4);
        assert_eq!(session.id(), 7);
        assert_eq!(session.nickname(), "GUEST007");
        assert_eq!(&*session.display_prefix(), "GUEST007: ");
    }

    #[test]
    fn set_nickname_recomputes_prefix() {
        let (session, _outbox) = Session::new(1, 4);
        session.set_nickname("frank");

        assert_eq!(session.nickname(), "frank");
        assert_eq!(&*session.display_prefix(), "frank: ");
        assert!(session.has_nickname("frank"));
        assert!(!session.has_nickname("GUEST001"));
    }

    #[test]
    fn send_line_reaches_outbox() {
        let (session, mut outbox) = Session::new(1, 4);
        session.send_line("hello").unwrap();

        assert_eq!(&*outbox.lines.try_recv().unwrap(), "hello");
    }

    #[test]
    fn full_queue_is_reported() {
        let (session, _outbox) = Session::new(1, 1);
        session.send_line("one").unwrap();

        assert!(matches!(
            session.send_line("two"),
            Err(DeliveryError::QueueFull)
        ));
    }

    #[test]
    fn closed_session_refuses_lines() {
        let (session, outbox) = Session::new(1, 4);
        session.close();
        session.close();

        assert!(session.is_closed());
        assert!(outbox.closer.is_cancelled());
        assert!(matches!(session.send_line("x"), Err(DeliveryError::Closed)));
    }

    #[test]
    fn dropped_outbox_reports_closed() {
        let (session, outbox) = Session::new(1, 4);
        drop(outbox);

        assert!(matches!(session.send_line("x"), Err(DeliveryError::Closed)));
    }
}
