//! Upstream search client tests using wiremock.
//!
//! These tests verify the request the SearchClient sends to the recent
//! search endpoint and how it classifies the responses.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;
use sse_twitter::adapters::ReqwestHttpClient;
use sse_twitter::error::SearchError;
use sse_twitter::models::{Cursor, SearchOutcome, SearchQuery};
use sse_twitter::search_client::{SearchClient, TWEET_FIELDS, USER_AGENT};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/2/tweets/search/recent";

fn test_token() -> &'static str {
    "test-bearer-token"
}

fn client_for(server: &MockServer) -> SearchClient {
    SearchClient::new(Arc::new(ReqwestHttpClient::new()), Arc::from(test_token()))
        .with_base_url(format!("{}/2", server.uri()))
}

fn three_results() -> serde_json::Value {
    json!({
        "data": [
            { "id": "500", "author_id": "1", "created_at": "2022-04-15T05:20:03.000Z", "text": "first" },
            { "id": "499", "author_id": "2", "created_at": "2022-04-15T05:20:02.000Z", "text": "second" },
            { "id": "498", "author_id": "3", "created_at": "2022-04-15T05:20:01.000Z", "text": "third" }
        ],
        "meta": { "newest_id": "500", "oldest_id": "498", "result_count": 3 }
    })
}

#[tokio::test]
async fn test_search_with_start_time_sends_auth_and_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("query", "rust lang"))
        .and(query_param("tweet.fields", TWEET_FIELDS))
        .and(query_param("start_time", "2022-04-15T05:20:00Z"))
        .and(query_param_is_missing("since_id"))
        .and(header("Authorization", format!("Bearer {}", test_token()).as_str()))
        .and(header("User-Agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(three_results()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let start = chrono::DateTime::parse_from_rfc3339("2022-04-15T05:20:00Z")
        .unwrap()
        .with_timezone(&Utc);
    let query = SearchQuery::new("rust lang", start);

    let outcome = client_for(&mock_server)
        .search(&query, &Cursor::new())
        .await
        .expect("search should succeed");

    match outcome {
        SearchOutcome::Page(page) => {
            assert_eq!(page.result_count, 3);
            assert_eq!(page.newest_id, "500");
            let texts: Vec<_> = page.items.iter().map(|i| i.text.as_str()).collect();
            assert_eq!(texts, vec!["first", "second", "third"]);
        }
        SearchOutcome::Empty => panic!("Expected a page"),
    }
}

#[tokio::test]
async fn test_search_with_cursor_omits_start_time() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("since_id", "500"))
        .and(query_param_is_missing("start_time"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "meta": { "result_count": 0 } })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let query = SearchQuery::new("rust", Utc::now() - Duration::minutes(10));
    let mut cursor = Cursor::new();
    cursor.advance("500");

    let outcome = client_for(&mock_server)
        .search(&query, &cursor)
        .await
        .expect("search should succeed");

    assert_eq!(outcome, SearchOutcome::Empty);
}

#[tokio::test]
async fn test_search_unauthorized_is_upstream_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .search(&SearchQuery::without_start("rust"), &Cursor::new())
        .await;

    match result {
        Err(SearchError::Upstream { status, body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "Unauthorized");
        }
        other => panic!("Expected Upstream error with status 401, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_bad_created_at_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": "7", "author_id": "1", "created_at": "2022-04-15 05:20:03", "text": "x" }
            ],
            "meta": { "newest_id": "7", "result_count": 1 }
        })))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .search(&SearchQuery::without_start("rust"), &Cursor::new())
        .await;

    assert!(matches!(result, Err(SearchError::MalformedResponse { .. })));
}

#[tokio::test]
async fn test_search_connection_refused_is_transport_error() {
    let client = SearchClient::new(Arc::new(ReqwestHttpClient::new()), Arc::from(test_token()))
        .with_base_url("http://127.0.0.1:1/2");

    let result = client
        .search(&SearchQuery::without_start("rust"), &Cursor::new())
        .await;

    assert!(matches!(result, Err(SearchError::Transport(_))));
}
