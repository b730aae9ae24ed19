use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use super::{deserialize_id, deserialize_optional_id};
use crate::error::SearchError;

/// Upstream `created_at` layout: UTC, fractional seconds, literal `Z`.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// One matching record from the upstream search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchItem {
    pub id: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub text: String,
}

/// A non-empty page of search results, in upstream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    pub items: Vec<SearchItem>,
    pub result_count: u32,
    /// Newest id in this page; becomes the stream's cursor
    pub newest_id: String,
    pub next_token: Option<String>,
}

/// Result of parsing one upstream search response.
///
/// Upstream omits `newest_id` when nothing matched, so "no results" is its
/// own variant rather than a page with zero items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Page(SearchPage),
    Empty,
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    data: Option<Vec<RawItem>>,
    meta: RawMeta,
}

#[derive(Debug, Deserialize)]
struct RawMeta {
    result_count: u32,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    newest_id: Option<String>,
    #[serde(default)]
    next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(deserialize_with = "deserialize_id")]
    id: String,
    #[serde(deserialize_with = "deserialize_id")]
    author_id: String,
    created_at: String,
    text: String,
}

impl SearchOutcome {
    /// Parse a raw response body.
    ///
    /// `result_count` is checked before anything else. Any record that fails
    /// to parse fails the whole page.
    pub fn from_slice(body: &[u8]) -> Result<Self, SearchError> {
        let raw: RawResponse = serde_json::from_slice(body)?;

        if raw.meta.result_count == 0 {
            return Ok(SearchOutcome::Empty);
        }

        let newest_id = raw
            .meta
            .newest_id
            .ok_or_else(|| SearchError::malformed("meta.newest_id missing from non-empty result"))?;
        let data = raw
            .data
            .ok_or_else(|| SearchError::malformed("data missing from non-empty result"))?;

        let items = data
            .into_iter()
            .map(SearchItem::from_raw)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SearchOutcome::Page(SearchPage {
            items,
            result_count: raw.meta.result_count,
            newest_id,
            next_token: raw.meta.next_token,
        }))
    }
}

impl SearchItem {
    fn from_raw(raw: RawItem) -> Result<Self, SearchError> {
        let created_at = parse_created_at(&raw.created_at).ok_or_else(|| {
            SearchError::malformed(format!(
                "record {} has unparsable created_at '{}'",
                raw.id, raw.created_at
            ))
        })?;

        Ok(SearchItem {
            id: raw.id,
            author_id: raw.author_id,
            created_at,
            text: raw.text,
        })
    }
}

/// Parse `created_at`, requiring the fractional part.
///
/// chrono treats `%.f` as optional when parsing, so its presence is checked
/// up front.
fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    let (_, fraction) = raw.strip_suffix('Z')?.rsplit_once('.')?;
    if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDateTime::parse_from_str(raw, CREATED_AT_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
