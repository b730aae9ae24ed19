//! sse-twitter - stream near-real-time search results to web clients over SSE
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod config;
pub mod error;
pub mod models;
pub mod search_client;
pub mod server;
pub mod stream;
pub mod traits;
