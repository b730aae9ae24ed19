use std::time::Duration;

use crate::error::SearchError;
use crate::models::{Cursor, SearchOutcome, SearchQuery};
use crate::search_client::SearchClient;
use crate::traits::EventTransport;

use super::StreamEvent;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_RETRY_HINT_MS: u64 = 5000;

/// Per-stream timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSettings {
    /// Pause between the end of one cycle and the start of the next
    pub poll_interval: Duration,
    /// Reconnect hint attached to every event
    pub retry_hint_ms: u64,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            retry_hint_ms: DEFAULT_RETRY_HINT_MS,
        }
    }
}

/// Where a stream is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPhase {
    Init,
    Polling,
    Emitting,
    Waiting,
    Terminated,
}

/// Normal end of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEnd {
    /// The transport reported the client gone.
    ClientDisconnected,
}

/// Poll loop state for one client.
///
/// Owns the search client and the cursor; neither is shared with any other
/// stream. Cycles run strictly one after another.
#[derive(Debug)]
pub struct PollStream {
    client: SearchClient,
    query: SearchQuery,
    cursor: Cursor,
    settings: StreamSettings,
    phase: StreamPhase,
    cycles: u64,
}

impl PollStream {
    pub fn new(client: SearchClient, query: SearchQuery, settings: StreamSettings) -> Self {
        Self {
            client,
            query,
            cursor: Cursor::new(),
            settings,
            phase: StreamPhase::Init,
            cycles: 0,
        }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn phase(&self) -> StreamPhase {
        self.phase
    }

    /// Number of events delivered so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run until the client disconnects or a poll fails.
    ///
    /// Upstream and parse failures are returned as errors and are not
    /// retried.
    pub async fn run<T>(&mut self, transport: &T) -> Result<StreamEnd, SearchError>
    where
        T: EventTransport + ?Sized,
    {
        tracing::info!(query = %self.query.text, start = ?self.query.start_time, "Stream opened");

        let result = self.run_cycles(transport).await;
        self.phase = StreamPhase::Terminated;

        match &result {
            Ok(StreamEnd::ClientDisconnected) => {
                tracing::debug!(cycles = self.cycles, "Disconnected from client");
            }
            Err(e) => {
                tracing::warn!(
                    code = e.error_code(),
                    cycles = self.cycles,
                    "Stream terminated by upstream failure: {}",
                    e
                );
            }
        }

        result
    }

    async fn run_cycles<T>(&mut self, transport: &T) -> Result<StreamEnd, SearchError>
    where
        T: EventTransport + ?Sized,
    {
        loop {
            self.phase = StreamPhase::Polling;
            let outcome = tokio::select! {
                biased;
                _ = transport.closed() => return Ok(StreamEnd::ClientDisconnected),
                outcome = self.client.search(&self.query, &self.cursor) => outcome?,
            };

            self.phase = StreamPhase::Emitting;
            let event = self.apply(outcome);
            if transport.push(event).await.is_err() {
                return Ok(StreamEnd::ClientDisconnected);
            }
            self.cycles += 1;

            self.phase = StreamPhase::Waiting;
            tokio::select! {
                biased;
                _ = transport.closed() => return Ok(StreamEnd::ClientDisconnected),
                _ = tokio::time::sleep(self.settings.poll_interval) => {}
            }
        }
    }

    /// Fold one search outcome into the cursor and build its event.
    fn apply(&mut self, outcome: SearchOutcome) -> StreamEvent {
        let retry = self.settings.retry_hint_ms;
        match outcome {
            SearchOutcome::Page(page) => {
                tracing::debug!(
                    result_count = page.result_count,
                    newest_id = %page.newest_id,
                    "New results"
                );
                self.cursor.advance(page.newest_id.clone());
                StreamEvent::page(&page, retry)
            }
            SearchOutcome::Empty => {
                tracing::debug!(cursor = ?self.cursor.newest_id(), "No new results");
                StreamEvent::empty(retry)
            }
        }
    }
}
