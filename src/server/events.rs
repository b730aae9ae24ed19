//! `/events`: one server-sent event stream per connected client.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use tokio_stream::StreamExt;

use super::AppState;
use crate::adapters::ChannelTransport;
use crate::error::InputError;
use crate::models::StreamParams;
use crate::stream::{PollStream, StreamEvent};

/// Open a search stream for `?q=<phrase>&start=<instant>`.
///
/// Each request gets its own poll task and cursor. The task stops when the
/// response body is dropped, i.e. when the client disconnects.
pub async fn events_handler(
    State(state): State<AppState>,
    Query(params): Query<StreamParams>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, InputError> {
    let query = params.into_query()?;
    tracing::debug!(query = %query.text, start = ?query.start_time, "Opening event stream");

    let mut poll = PollStream::new(state.search_client(), query, state.settings);
    let (transport, events) = ChannelTransport::channel();

    tokio::spawn(async move {
        // run() logs its own termination
        let _ = poll.run(&transport).await;
    });

    let stream = events.map(|event| Ok(to_sse_event(event)));
    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

/// Wire representation of one [`StreamEvent`].
pub fn to_sse_event(event: StreamEvent) -> Event {
    Event::default()
        .event(event.kind)
        .retry(Duration::from_millis(event.retry_hint_ms))
        .data(event.payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SearchItem, SearchPage};
    use axum::response::IntoResponse;
    use chrono::Utc;

    async fn encode(event: StreamEvent) -> String {
        let stream = futures::stream::iter(vec![Ok::<_, Infallible>(to_sse_event(event))]);
        let body = Sse::new(stream).into_response().into_body();
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_empty_event_wire_format() {
        let wire = encode(StreamEvent::empty(5000)).await;
        assert_eq!(
            wire,
            "event: new_tweets\nretry:5000\ndata: <p>No tweets found</p>\n\n"
        );
    }

    #[tokio::test]
    async fn test_multiline_item_text_is_split_into_data_lines() {
        let page = SearchPage {
            items: vec![SearchItem {
                id: "7".to_string(),
                author_id: "42".to_string(),
                created_at: Utc::now(),
                text: "line one\r\nline two".to_string(),
            }],
            result_count: 1,
            newest_id: "7".to_string(),
            next_token: None,
        };

        let wire = encode(StreamEvent::page(&page, 5000)).await;

        assert!(wire.contains("data: <p>line one\ndata: line two</p>\n"));
        assert!(!wire.contains('\r'));
    }
}
