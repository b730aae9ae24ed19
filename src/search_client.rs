//! Upstream recent-search client.
//!
//! Issues one GET per poll cycle against the upstream search endpoint and
//! parses the body into a [`SearchOutcome`].

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::error::SearchError;
use crate::models::{Cursor, SearchOutcome, SearchQuery};
use crate::traits::{HttpClient, HttpError};

pub const DEFAULT_API_BASE_URL: &str = "https://api.twitter.com/2";
pub const SEARCH_PATH: &str = "/tweets/search/recent";
pub const USER_AGENT: &str = "v2RecentSearchPython";

/// Fields requested so every record can populate a `SearchItem`.
pub const TWEET_FIELDS: &str = "author_id,created_at";

/// Upstream rejects `start_time` values newer than this many seconds ago.
pub const MIN_START_LAG_SECS: i64 = 10;

/// Wire format for time bounds: second precision, literal `Z`.
pub const UPSTREAM_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Client for the upstream search API.
///
/// Each stream owns its own `SearchClient`; the underlying [`HttpClient`]
/// and the bearer credential are shared read-only.
pub struct SearchClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
    bearer_token: Arc<str>,
}

impl SearchClient {
    /// Create a client against the default API base URL.
    pub fn new(http: Arc<dyn HttpClient>, bearer_token: Arc<str>) -> Self {
        Self {
            http,
            base_url: DEFAULT_API_BASE_URL.to_string(),
            bearer_token,
        }
    }

    /// Point the client at a different API root (no trailing slash).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Full URL of the search endpoint, without query string.
    pub fn search_url(&self) -> String {
        format!("{}{}", self.base_url, SEARCH_PATH)
    }

    /// Run one search.
    ///
    /// The time bound, if any, is clamped against the current instant on
    /// every call.
    pub async fn search(
        &self,
        query: &SearchQuery,
        cursor: &Cursor,
    ) -> Result<SearchOutcome, SearchError> {
        let url = self.search_url();
        let params = build_query_params(query, cursor, Utc::now());
        tracing::debug!(url = %url, ?params, "Searching upstream");

        let response = self.http.get(&url, &params, &self.headers()?).await?;

        if !response.is_success() {
            return Err(SearchError::Upstream {
                status: response.status,
                body: response.text_lossy(),
            });
        }

        SearchOutcome::from_slice(&response.body)
    }

    fn headers(&self) -> Result<HeaderMap, HttpError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.bearer_token))
            .map_err(|e| HttpError::InvalidRequest(format!("bearer token: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
        Ok(headers)
    }
}

impl fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchClient")
            .field("base_url", &self.base_url)
            .field("bearer_token", &"<redacted>")
            .finish()
    }
}

/// Build the query parameters for one search call.
///
/// A cursor takes precedence: when it is set no time bound is sent. Without
/// a cursor the start time is clamped to at most `now - 10s`.
pub fn build_query_params(
    query: &SearchQuery,
    cursor: &Cursor,
    now: DateTime<Utc>,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("query", query.text.clone()),
        ("tweet.fields", TWEET_FIELDS.to_string()),
    ];

    if let Some(since_id) = cursor.newest_id() {
        params.push(("since_id", since_id.to_string()));
    } else if let Some(start_time) = query.start_time {
        let start_time = clamp_start_time(start_time, now);
        params.push(("start_time", format_upstream_time(start_time)));
    }

    params
}

/// Move `start` back to `now - 10s` if it is any newer than that.
pub fn clamp_start_time(start: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let latest_allowed = now - Duration::seconds(MIN_START_LAG_SECS);
    start.min(latest_allowed)
}

pub fn format_upstream_time(dt: DateTime<Utc>) -> String {
    dt.format(UPSTREAM_TIME_FORMAT).to_string()
}
