//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - Upstream HTTP client using reqwest
//! - [`ChannelTransport`] - Push channel backed by a tokio mpsc channel
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::RecordingTransport`] - Records pushed events

pub mod channel_transport;
pub mod mock;
pub mod reqwest_http;

pub use channel_transport::ChannelTransport;
pub use mock::{MockHttpClient, RecordingTransport};
pub use reqwest_http::ReqwestHttpClient;
