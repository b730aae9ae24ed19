//! Error taxonomy for the search stream.
//!
//! - **Search errors**: one failed poll cycle (upstream status, malformed
//!   payload, or the request never completing). All of them end the stream.
//! - **Input errors**: `/events` parameters that are missing or unparsable.
//!   These are rejected before a stream is opened.
//! - **Config errors**: startup configuration problems.
//!
//! An empty search result is not an error; see
//! [`SearchOutcome::Empty`](crate::models::SearchOutcome::Empty). A client
//! disconnect is not an error either; see
//! [`StreamEnd`](crate::stream::StreamEnd).

mod config;
mod input;
mod search;

pub use config::ConfigError;
pub use input::InputError;
pub use search::SearchError;
