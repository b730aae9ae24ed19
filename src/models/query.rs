use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::InputError;

/// What one stream searches for. Fixed once the stream starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free-text search phrase, already URL-decoded
    pub text: String,
    /// Lower time bound, only consulted until the cursor is set
    pub start_time: Option<DateTime<Utc>>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            start_time: Some(start_time),
        }
    }

    /// A query with no time bound; upstream applies its own default window.
    pub fn without_start(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start_time: None,
        }
    }
}

/// Incremental marker: the newest id seen so far by one stream.
///
/// Owned by exactly one poll loop and never shared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    newest_id: Option<String>,
}

impl Cursor {
    /// The cursor of a stream that has not seen any results yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn newest_id(&self) -> Option<&str> {
        self.newest_id.as_deref()
    }

    /// Move the cursor to the newest id of a non-empty page.
    pub fn advance(&mut self, newest_id: impl Into<String>) {
        self.newest_id = Some(newest_id.into());
    }
}

/// Raw `/events` query parameters.
///
/// The extractor has already percent-decoded them; `+` is decoded as a space.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamParams {
    pub q: Option<String>,
    pub start: Option<String>,
}

impl StreamParams {
    /// Validate the parameters into a [`SearchQuery`].
    ///
    /// `start` may be integer unix seconds or an RFC 3339 instant.
    pub fn into_query(self) -> Result<SearchQuery, InputError> {
        let text = self
            .q
            .filter(|q| !q.trim().is_empty())
            .ok_or(InputError::MissingParam("q"))?;
        let raw_start = self
            .start
            .filter(|s| !s.trim().is_empty())
            .ok_or(InputError::MissingParam("start"))?;
        let start_time = parse_start(raw_start.trim())
            .ok_or_else(|| InputError::InvalidStart(raw_start.clone()))?;

        Ok(SearchQuery::new(text, start_time))
    }
}

fn parse_start(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(secs) = raw.parse::<i64>() {
        return DateTime::from_timestamp(secs, 0);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn params(q: Option<&str>, start: Option<&str>) -> StreamParams {
        StreamParams {
            q: q.map(str::to_string),
            start: start.map(str::to_string),
        }
    }

    #[test]
    fn test_cursor_starts_absent() {
        let cursor = Cursor::new();
        assert_eq!(cursor.newest_id(), None);
    }

    #[test]
    fn test_cursor_advance_replaces_id() {
        let mut cursor = Cursor::new();
        cursor.advance("100");
        cursor.advance("500");
        assert_eq!(cursor.newest_id(), Some("500"));
    }

    #[test]
    fn test_into_query_unix_seconds() {
        let query = params(Some("rust lang"), Some("1650000000"))
            .into_query()
            .unwrap();
        assert_eq!(query.text, "rust lang");
        assert_eq!(
            query.start_time,
            Some(Utc.with_ymd_and_hms(2022, 4, 15, 5, 20, 0).unwrap())
        );
    }

    #[test]
    fn test_into_query_rfc3339() {
        let query = params(Some("rust"), Some("2022-04-15T07:20:00+02:00"))
            .into_query()
            .unwrap();
        assert_eq!(
            query.start_time,
            Some(Utc.with_ymd_and_hms(2022, 4, 15, 5, 20, 0).unwrap())
        );
    }

    #[test]
    fn test_into_query_missing_q() {
        let err = params(None, Some("1650000000")).into_query().unwrap_err();
        assert_eq!(err, InputError::MissingParam("q"));

        let err = params(Some("   "), Some("1650000000"))
            .into_query()
            .unwrap_err();
        assert_eq!(err, InputError::MissingParam("q"));
    }

    #[test]
    fn test_into_query_missing_start() {
        let err = params(Some("rust"), None).into_query().unwrap_err();
        assert_eq!(err, InputError::MissingParam("start"));
    }

    #[test]
    fn test_into_query_invalid_start() {
        let err = params(Some("rust"), Some("yesterday"))
            .into_query()
            .unwrap_err();
        assert_eq!(err, InputError::InvalidStart("yesterday".to_string()));
    }
}
