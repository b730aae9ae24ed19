//! The poll-and-stream loop.
//!
//! One [`PollStream`] per connected client: it polls the upstream search on
//! a fixed cadence, turns each result into a [`StreamEvent`] and pushes it
//! through an [`EventTransport`](crate::traits::EventTransport) until the
//! client goes away or the upstream fails.

mod event;
mod poller;

pub use event::{render_items, StreamEvent, EVENT_NAME, NO_RESULTS_HTML};
pub use poller::{PollStream, StreamEnd, StreamPhase, StreamSettings};
