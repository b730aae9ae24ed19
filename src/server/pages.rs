//! The search form and the fragment that subscribes to `/events`.

use axum::extract::Form;
use axum::response::Html;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::InputError;
use crate::stream::EVENT_NAME;

pub const HOME_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <script src="https://unpkg.com/htmx.org@1.7.0"></script>
    <script src="https://unpkg.com/htmx.org@1.7.0/dist/ext/sse.js"></script>
    <link rel="shortcut icon" href="data:image/x-icon;," type="image/x-icon">
</head>
<body>
    <h1>Tweets over SSE</h1>

    <form hx-post="/search">
    <div hx-target="this" hx-swap="outerHTML">
        <label>Search phrase</label>
        <input type="text" class="form-control" name="searchPhrase">
    </div>
    <button class="btn btn-default">Submit</button>
    </form>
</body>
</html>
"#;

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(rename = "searchPhrase")]
    pub search_phrase: Option<String>,
}

pub async fn home_handler() -> Html<&'static str> {
    Html(HOME_HTML)
}

/// Accept the form and answer with a fragment that connects to `/events`,
/// using the current instant as the stream's start time.
pub async fn search_handler(Form(form): Form<SearchForm>) -> Result<Html<String>, InputError> {
    let phrase = form
        .search_phrase
        .filter(|p| !p.trim().is_empty())
        .ok_or(InputError::MissingParam("searchPhrase"))?;
    let now = Utc::now();

    tracing::debug!(phrase = %phrase, start = %now, "Search submitted");

    Ok(Html(render_search_fragment(&phrase, now)))
}

pub fn render_search_fragment(phrase: &str, start: DateTime<Utc>) -> String {
    let events_url = format!(
        "/events?q={}&amp;start={}",
        urlencoding::encode(phrase),
        start.timestamp()
    );
    format!(
        r##"<div hx-ext="sse"
    sse-connect="{events_url}"
    sse-swap="{EVENT_NAME}"
    hx-trigger="changed"
    hx-target="#tgt"
    hx-swap="afterbegin"
>
    <p>Search: {phrase}</p>
    <div id="tgt"></div>
</div>
"##,
        phrase = html_escape::encode_text(phrase),
    )
}
