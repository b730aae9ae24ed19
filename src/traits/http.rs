//! Upstream HTTP seam.
//!
//! The search path only ever issues one kind of request: a GET with a query
//! string and a fixed header set. [`HttpClient`] models exactly that, so the
//! poll loop can run against a scripted client in tests.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use thiserror::Error;

/// Query string pairs, sent in order.
pub type QueryParams = [(&'static str, String)];

/// Status and body of one upstream reply.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, replacing invalid UTF-8. Used to carry upstream error
    /// bodies into logs.
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A request that never produced a response.
#[derive(Debug, Clone, Error)]
pub enum HttpError {
    #[error("could not connect to upstream: {0}")]
    ConnectionFailed(String),

    #[error("upstream request timed out: {0}")]
    Timeout(String),

    /// The request could not be built, e.g. a bad URL or header value.
    #[error("invalid upstream request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Other(String),
}

/// Issues search requests upstream.
///
/// One implementation is shared by every stream behind an `Arc`, so calls
/// must be safe to run concurrently.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET `url` with `query` appended as its query string.
    ///
    /// Non-2xx statuses come back as a [`Response`], not as an error.
    async fn get(
        &self,
        url: &str,
        query: &QueryParams,
        headers: &HeaderMap,
    ) -> Result<Response, HttpError>;
}
