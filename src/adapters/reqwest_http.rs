//! Production [`HttpClient`] on top of reqwest.

use async_trait::async_trait;
use reqwest::header::HeaderMap;

use crate::traits::{HttpClient, HttpError, QueryParams, Response};

/// Wraps one pooled `reqwest::Client`. Clones share the pool, so a single
/// instance serves every stream.
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::default()
    }
}

fn classify(err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout(err.to_string())
    } else if err.is_connect() {
        HttpError::ConnectionFailed(err.to_string())
    } else if err.is_builder() {
        HttpError::InvalidRequest(err.to_string())
    } else {
        HttpError::Other(err.to_string())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(
        &self,
        url: &str,
        query: &QueryParams,
        headers: &HeaderMap,
    ) -> Result<Response, HttpError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .headers(headers.clone())
            .send()
            .await
            .map_err(classify)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(classify)?;
        Ok(Response::new(status, body))
    }
}
