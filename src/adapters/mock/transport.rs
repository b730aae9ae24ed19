//! Recording event transport for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use crate::stream::StreamEvent;
use crate::traits::{EventTransport, TransportClosed};

/// Transport that stores every pushed event.
///
/// It can be closed by hand with [`disconnect`](RecordingTransport::disconnect)
/// or configured to close itself after a number of events, which simulates
/// a client going away mid-stream.
#[derive(Debug, Clone)]
pub struct RecordingTransport {
    events: Arc<Mutex<Vec<StreamEvent>>>,
    close_after: Option<usize>,
    closed_tx: Arc<watch::Sender<bool>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        let (closed_tx, _) = watch::channel(false);
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            close_after: None,
            closed_tx: Arc::new(closed_tx),
        }
    }

    /// Close the transport once `count` events have been delivered.
    pub fn close_after(mut self, count: usize) -> Self {
        self.close_after = Some(count);
        self
    }

    /// Simulate the client disconnecting.
    pub fn disconnect(&self) {
        self.closed_tx.send_replace(true);
    }

    /// Events delivered so far.
    pub fn events(&self) -> Vec<StreamEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventTransport for RecordingTransport {
    async fn push(&self, event: StreamEvent) -> Result<(), TransportClosed> {
        if self.is_closed() {
            return Err(TransportClosed);
        }

        let delivered = {
            let mut events = self.events.lock().unwrap();
            events.push(event);
            events.len()
        };

        if self.close_after.is_some_and(|limit| delivered >= limit) {
            self.disconnect();
        }
        Ok(())
    }

    async fn closed(&self) {
        let mut rx = self.closed_tx.subscribe();
        // Sender lives in self, so this only errors if self is gone.
        let _ = rx.wait_for(|closed| *closed).await;
    }

    fn is_closed(&self) -> bool {
        *self.closed_tx.borrow()
    }
}
