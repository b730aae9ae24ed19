use std::sync::Arc;

use color_eyre::Result;
use sse_twitter::adapters::ReqwestHttpClient;
use sse_twitter::config::ServerConfig;
use sse_twitter::server::start_server;
use sse_twitter::traits::HttpClient;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--version") {
        println!("sse-twitter {}", VERSION);
        return Ok(());
    }

    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sse_twitter=debug,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    let (handle, _addr) = start_server(&config, http).await?;

    handle.await?;
    Ok(())
}
