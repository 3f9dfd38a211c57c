//! Connection - Handles an individual client connection.
//!
//! Each Connection runs in its own Tokio task and owns its transport:
//!
//! ```text
//!   transport ──► FramedRead<LineCodec> ──► Event ──► router
//!       ▲
//!       └── FramedWrite<LineCodec> ◄── writer task ◄── session outbox
//! ```
//!
//! The ingress loop stops on end-of-stream, a read error, an oversize line,
//! or when the session is closed (eviction, failed write). Teardown removes
//! the session from the registry and waits for the writer, so the transport
//! is shut down exactly once.

use crate::network::TransportTuning;
use crate::router::{Event, EventSender};
use crate::state::{Hub, OutboundLine, Outbox, Session};
use crate::telemetry::spans;
use futures_util::{SinkExt, StreamExt};
use relay_proto::{LineCodec, ProtocolError, reply};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, ReadHalf, WriteHalf};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{Instrument, debug, info, warn};

/// A client connection handler.
pub struct Connection<S> {
    stream: S,
    addr: SocketAddr,
    hub: Arc<Hub>,
    events: EventSender,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + TransportTuning + Send + 'static,
{
    /// Create a new connection handler, tuning the transport once.
    pub fn new(
        stream: S,
        addr: SocketAddr,
        hub: Arc<Hub>,
        events: EventSender,
        tcp_nodelay: bool,
    ) -> Self {
        if let Err(e) = stream.tune(tcp_nodelay) {
            warn!(%addr, error = %e, "Failed to apply socket options");
        }
        Self {
            stream,
            addr,
            hub,
            events,
        }
    }

    /// Register the session, greet the client and relay until disconnect.
    pub async fn run(self) {
        let (session, outbox) = self.hub.registry.create();
        let span = spans::connection(session.id(), &self.addr);
        self.serve(session, outbox).instrument(span).await;
    }

    async fn serve(self, session: Arc<Session>, outbox: Outbox) {
        info!("Client connected");

        let (read_half, write_half) = tokio::io::split(self.stream);
        let reader = FramedRead::new(read_half, LineCodec::with_max_len(self.hub.limits.max_line_len));
        let writer = FramedWrite::new(write_half, LineCodec::new());

        let writer_task = tokio::spawn(
            write_loop(
                writer,
                outbox,
                Arc::clone(&session),
                self.hub.limits.write_timeout(),
            )
            .in_current_span(),
        );

        // The summary is taken after insertion, so it includes this client.
        greet(&session, reply::online_now(&self.hub.registry.online_summary()));
        greet(&session, reply::welcome(&session.nickname()));

        read_loop(reader, &session, &self.events).await;

        // Teardown. Removing an already-evicted id is a no-op.
        self.hub.registry.remove(session.id());
        session.close();
        if let Err(e) = writer_task.await {
            warn!(error = %e, "Writer task failed");
        }
        info!(nickname = %session.nickname(), "Client disconnected");
    }
}

fn greet(session: &Session, line: String) {
    if let Err(e) = session.send_line(line) {
        warn!(error = %e, "Could not queue greeting");
        crate::metrics::record_delivery_failure(e.error_code());
    }
}

async fn read_loop<R>(
    mut reader: FramedRead<ReadHalf<R>, LineCodec>,
    session: &Arc<Session>,
    events: &EventSender,
) where
    R: AsyncRead,
{
    loop {
        tokio::select! {
            _ = session.closed() => {
                debug!("Session closed by server");
                break;
            }
            frame = reader.next() => match frame {
                Some(Ok(line)) => {
                    if line.is_empty() {
                        continue;
                    }
                    let event = Event { sender: session.id(), payload: line };
                    if events.send(event).is_err() {
                        warn!("Router gone, dropping connection");
                        break;
                    }
                }
                Some(Err(ProtocolError::MessageTooLong { actual, limit })) => {
                    warn!(actual, limit, "Line too long, disconnecting");
                    break;
                }
                Some(Err(e)) => {
                    debug!(error = %e, "Read error");
                    break;
                }
                None => {
                    debug!("Client closed connection");
                    break;
                }
            }
        }
    }
}

/// Drain the session outbox onto the transport.
///
/// Queued lines are preferred over the close signal, so a notice queued
/// before the session was closed still goes out. A failed or timed-out
/// write closes the session.
async fn write_loop<W>(
    mut writer: FramedWrite<WriteHalf<W>, LineCodec>,
    mut outbox: Outbox,
    session: Arc<Session>,
    write_timeout: Duration,
) where
    W: AsyncWrite,
{
    loop {
        tokio::select! {
            biased;
            line = outbox.lines.recv() => {
                let Some(line) = line else { break };
                match tokio::time::timeout(write_timeout, writer.send(line)).await {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        debug!(error = %e, "Write failed");
                        break;
                    }
                    Err(_) => {
                        warn!(timeout_ms = write_timeout.as_millis() as u64, "Write timed out");
                        break;
                    }
                }
            }
            _ = outbox.closer.cancelled() => break,
        }
    }

    session.close();
    let shutdown = SinkExt::<OutboundLine>::close(&mut writer);
    if let Ok(Err(e)) = tokio::time::timeout(write_timeout, shutdown).await {
        debug!(error = %e, "Transport shutdown failed");
    }
}
