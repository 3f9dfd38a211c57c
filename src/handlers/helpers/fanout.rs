//! Broadcast fan-out to every session but the sender.

use crate::error::DeliveryError;
use crate::state::{OutboundLine, SessionId, SessionRegistry};
use relay_proto::reply;
use std::sync::Arc;
use tracing::{debug, warn};

/// Deliver `payload` from `sender` to every other registered session.
///
/// The line is built once with the sender's current prefix and shared by all
/// recipients. Each recipient gets a non-blocking enqueue. A recipient whose
/// queue is full is treated like a failed transport: it is removed and
/// closed, and the others still get the line. Returns how many recipients
/// the line was queued for.
pub fn broadcast(registry: &SessionRegistry, sender: SessionId, payload: &str) -> usize {
    let Some(origin) = registry.lookup(sender) else {
        debug!(id = sender, "Dropping line from session that is not online");
        return 0;
    };

    let line: OutboundLine = reply::broadcast(&origin.display_prefix(), payload).into();

    let mut delivered = 0;
    registry.for_each(|recipient| {
        if recipient.id() == sender {
            return;
        }
        match recipient.send_line(Arc::clone(&line)) {
            Ok(()) => delivered += 1,
            Err(e @ DeliveryError::QueueFull) => {
                warn!(from = sender, to = recipient.id(), "Recipient queue full, disconnecting");
                crate::metrics::record_delivery_failure(e.error_code());
                registry.remove(recipient.id());
                recipient.close();
            }
            Err(e @ DeliveryError::Closed) => {
                debug!(from = sender, to = recipient.id(), "Recipient already closed");
                crate::metrics::record_delivery_failure(e.error_code());
            }
        }
    });

    crate::metrics::record_broadcast(delivered);
    delivered
}
