//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - Upstream HTTP operations
//! - [`EventTransport`] - Push channel to one connected client

pub mod http;
pub mod transport;

pub use http::{HttpClient, HttpError, QueryParams, Response};
pub use transport::{EventTransport, TransportClosed};
