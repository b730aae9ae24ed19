//! Startup configuration errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("Environment variable {0} is not set")]
    MissingVar(&'static str),

    /// An environment variable is set but unparsable or out of range.
    #[error("Invalid value for {var}: '{value}'")]
    InvalidVar { var: &'static str, value: String },
}
