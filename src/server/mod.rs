//! HTTP server: the `/events` push channel plus the search form pages.

mod events;
mod pages;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::search_client::SearchClient;
use crate::stream::StreamSettings;
use crate::traits::HttpClient;

pub use events::{events_handler, to_sse_event};
pub use pages::{home_handler, render_search_fragment, search_handler, SearchForm, HOME_HTML};

/// Shared state for request handlers. Everything in it is read-only.
#[derive(Clone)]
pub struct AppState {
    /// Upstream HTTP client, shared by all streams
    pub http: Arc<dyn HttpClient>,
    /// Upstream credential
    pub bearer_token: Arc<str>,
    pub api_base_url: String,
    pub settings: StreamSettings,
}

impl AppState {
    pub fn new(config: &ServerConfig, http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            bearer_token: Arc::clone(&config.bearer_token),
            api_base_url: config.api_base_url.clone(),
            settings: config.stream,
        }
    }

    /// A fresh search client for one stream.
    pub fn search_client(&self) -> SearchClient {
        SearchClient::new(Arc::clone(&self.http), Arc::clone(&self.bearer_token))
            .with_base_url(self.api_base_url.as_str())
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(home_handler))
        .route("/search", post(search_handler))
        .route("/events", get(events_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `config.bind_addr` and serve in a background task.
///
/// Returns the server task and the address actually bound, which differs
/// from the configured one when port 0 is requested.
pub async fn start_server(
    config: &ServerConfig,
    http: Arc<dyn HttpClient>,
) -> color_eyre::Result<(JoinHandle<()>, SocketAddr)> {
    let app = router(AppState::new(config, http));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    let actual_addr = listener.local_addr()?;

    tracing::info!("Listening on http://{}", actual_addr);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok((handle, actual_addr))
}
