//! Channel-backed event transport.
//!
//! The poll loop holds the sending half; the HTTP response body owns the
//! receiving half. When the client disconnects the server drops the body,
//! which drops the receiver and closes the transport.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::stream::StreamEvent;
use crate::traits::{EventTransport, TransportClosed};

/// Buffer between the poll loop and the response body. Kept at one so at
/// most a single undelivered event exists per stream.
pub const CHANNEL_CAPACITY: usize = 1;

/// Sending half of a stream's push channel.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: mpsc::Sender<StreamEvent>,
}

impl ChannelTransport {
    /// Create a connected transport and the stream of events it delivers.
    pub fn channel() -> (Self, ReceiverStream<StreamEvent>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        (Self { tx }, ReceiverStream::new(rx))
    }
}

#[async_trait]
impl EventTransport for ChannelTransport {
    async fn push(&self, event: StreamEvent) -> Result<(), TransportClosed> {
        self.tx.send(event).await.map_err(|_| TransportClosed)
    }

    async fn closed(&self) {
        self.tx.closed().await
    }

    fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
