//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with queued responses
//! - [`RecordingTransport`] - Event transport that records pushes

pub mod http;
pub mod transport;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use transport::RecordingTransport;
