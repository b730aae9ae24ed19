//! Errors raised by a single upstream search call.

use thiserror::Error;

use crate::traits::HttpError;

/// Failure of one poll against the upstream search API.
///
/// Every variant terminates the stream that issued the poll. There is no
/// retry; the client's own reconnect timer is the only recovery path.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// Upstream answered with a non-success status.
    #[error("Upstream returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The response body did not satisfy the result parsing contract.
    #[error("Malformed search response: {message}")]
    MalformedResponse { message: String },

    /// The request never produced a response.
    #[error("Upstream request failed: {0}")]
    Transport(#[from] HttpError),
}

impl SearchError {
    /// Build a malformed-response error from anything displayable.
    pub fn malformed(message: impl Into<String>) -> Self {
        SearchError::MalformedResponse {
            message: message.into(),
        }
    }

    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SearchError::Upstream { .. } => "E_SEARCH_UPSTREAM",
            SearchError::MalformedResponse { .. } => "E_SEARCH_MALFORMED",
            SearchError::Transport(_) => "E_SEARCH_TRANSPORT",
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::malformed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_display() {
        let err = SearchError::Upstream {
            status: 401,
            body: "Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "Upstream returned HTTP 401: Unauthorized");
    }

    #[test]
    fn test_malformed_display() {
        let err = SearchError::malformed("bad created_at");
        assert_eq!(err.to_string(), "Malformed search response: bad created_at");
    }

    #[test]
    fn test_from_http_error() {
        let err: SearchError = HttpError::Timeout("30s".to_string()).into();
        assert!(matches!(err, SearchError::Transport(HttpError::Timeout(_))));
        assert_eq!(err.error_code(), "E_SEARCH_TRANSPORT");
    }
}
