//! Push channel abstraction.
//!
//! An [`EventTransport`] delivers the events of one stream to one connected
//! client, in order, and reports when that client is gone.

use async_trait::async_trait;

use crate::stream::StreamEvent;

/// The client is no longer reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("client transport closed")]
pub struct TransportClosed;

/// Ordered event delivery to a single client.
///
/// The producer treats a failed [`push`](EventTransport::push) and a
/// resolved [`closed`](EventTransport::closed) the same way: stop at once.
#[async_trait]
pub trait EventTransport: Send + Sync {
    /// Deliver one event. Events are delivered in call order.
    async fn push(&self, event: StreamEvent) -> Result<(), TransportClosed>;

    /// Resolves once the client has disconnected.
    ///
    /// Must be cancel-safe so it can be raced in `tokio::select!`.
    async fn closed(&self);

    /// Non-blocking check of the same condition as [`closed`](EventTransport::closed).
    fn is_closed(&self) -> bool;
}
