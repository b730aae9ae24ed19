//! Events emitted once per poll cycle and their HTML payloads.

use crate::models::{SearchItem, SearchPage};

/// Event name for every emission, with or without results.
pub const EVENT_NAME: &str = "new_tweets";

/// Payload sent when a poll finds nothing new.
pub const NO_RESULTS_HTML: &str = "<p>No tweets found</p>";

/// One push event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEvent {
    /// SSE event name
    pub kind: &'static str,
    /// Advisory reconnect delay for the client, in milliseconds
    pub retry_hint_ms: u64,
    /// HTML fragment
    pub payload: String,
}

impl StreamEvent {
    /// Event carrying every item of a non-empty page.
    pub fn page(page: &SearchPage, retry_hint_ms: u64) -> Self {
        Self {
            kind: EVENT_NAME,
            retry_hint_ms,
            payload: render_items(&page.items),
        }
    }

    /// The fixed "no results" event.
    pub fn empty(retry_hint_ms: u64) -> Self {
        Self {
            kind: EVENT_NAME,
            retry_hint_ms,
            payload: NO_RESULTS_HTML.to_string(),
        }
    }
}

/// Render items in upstream order, one paragraph each. Item text is escaped.
///
/// Line breaks are normalised to `\n`: an SSE data field may be split on
/// `\n` but must never contain a bare `\r`.
pub fn render_items(items: &[SearchItem]) -> String {
    let mut html = String::new();
    for item in items {
        let text = item.text.replace("\r\n", "\n").replace('\r', "\n");
        html.push_str("<p>");
        html.push_str(&html_escape::encode_text(&text));
        html.push_str("</p>");
    }
    html
}
