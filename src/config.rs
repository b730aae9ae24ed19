//! Server configuration.
//!
//! Built from environment variables at startup and passed down explicitly;
//! nothing here is global.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use crate::error::ConfigError;
use crate::search_client::DEFAULT_API_BASE_URL;
use crate::stream::StreamSettings;

pub const ENV_BEARER_TOKEN: &str = "TWITTER_BEARER_TOKEN";
pub const ENV_BIND_ADDR: &str = "SSE_TWITTER_ADDR";
pub const ENV_API_BASE: &str = "SSE_TWITTER_API_BASE";
pub const ENV_POLL_SECS: &str = "SSE_TWITTER_POLL_SECS";
pub const ENV_RETRY_MS: &str = "SSE_TWITTER_RETRY_MS";

pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8000);

/// Configuration for the streaming server.
///
/// # Example
///
/// ```ignore
/// use sse_twitter::config::ServerConfig;
///
/// let config = ServerConfig::new("token")
///     .with_bind_addr("127.0.0.1:0".parse().unwrap())
///     .with_poll_interval(Duration::from_secs(2));
/// ```
#[derive(Clone)]
pub struct ServerConfig {
    /// Upstream API credential, shared read-only by every stream
    pub bearer_token: Arc<str>,
    /// Listen address
    pub bind_addr: SocketAddr,
    /// Upstream API root, e.g. `https://api.twitter.com/2`
    pub api_base_url: String,
    /// Poll cadence and retry hint for each stream
    pub stream: StreamSettings,
}

/// Defaults with an empty credential; `from_env` always sets one.
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bearer_token: Arc::from(""),
            bind_addr: DEFAULT_BIND_ADDR,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            stream: StreamSettings::default(),
        }
    }
}

impl ServerConfig {
    /// Create a config with defaults for everything but the credential.
    pub fn new(bearer_token: impl Into<Arc<str>>) -> Self {
        Self {
            bearer_token: bearer_token.into(),
            ..Self::default()
        }
    }

    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.stream.poll_interval = interval;
        self
    }

    pub fn with_retry_hint_ms(mut self, retry_ms: u64) -> Self {
        self.stream.retry_hint_ms = retry_ms;
        self
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(ENV_BEARER_TOKEN)
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingVar(ENV_BEARER_TOKEN))?;

        let mut config = Self::new(token.trim());

        if let Some(addr) = lookup(ENV_BIND_ADDR) {
            config.bind_addr = parse_var(ENV_BIND_ADDR, &addr)?;
        }
        if let Some(url) = lookup(ENV_API_BASE) {
            config.api_base_url = url;
        }
        if let Some(secs) = lookup(ENV_POLL_SECS) {
            let parsed: u64 = parse_var(ENV_POLL_SECS, &secs)?;
            // a zero interval would poll upstream back to back
            if parsed == 0 {
                return Err(ConfigError::InvalidVar {
                    var: ENV_POLL_SECS,
                    value: secs,
                });
            }
            config.stream.poll_interval = Duration::from_secs(parsed);
        }
        if let Some(ms) = lookup(ENV_RETRY_MS) {
            config.stream.retry_hint_ms = parse_var(ENV_RETRY_MS, &ms)?;
        }

        Ok(config)
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bearer_token", &"<redacted>")
            .field("bind_addr", &self.bind_addr)
            .field("api_base_url", &self.api_base_url)
            .field("stream", &self.stream)
            .finish()
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidVar {
        var,
        value: value.to_string(),
    })
}
