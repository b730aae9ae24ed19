//! Rejections of an inbound stream request.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// A stream request whose parameters cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A required parameter was absent or blank.
    #[error("Missing required parameter '{0}'")]
    MissingParam(&'static str),

    /// The start parameter is neither unix seconds nor an RFC 3339 instant.
    #[error("Invalid start time '{0}'")]
    InvalidStart(String),
}

impl InputError {
    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            InputError::MissingParam(_) => "E_INPUT_MISSING",
            InputError::InvalidStart(_) => "E_INPUT_START",
        }
    }
}

impl IntoResponse for InputError {
    fn into_response(self) -> Response {
        tracing::debug!(code = self.error_code(), "Rejecting request: {}", self);
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}
