mod config;
mod dashboard;
mod error;
mod handlers;
mod models;
mod router;
mod state;
mod upstream;

use config::GatewayConfig;
use market_data::{FeedState, StreamIngestor, TungsteniteConnector};
use router::create_router;
use state::AppState;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Starting LLP dashboard gateway");

    let config = GatewayConfig::from_env();

    // Stream ingestor owns writes to the shared feed for the process lifetime
    let feed = FeedState::shared();
    let ingestor = StreamIngestor::new(config.feed.clone(), TungsteniteConnector, feed.clone());
    tokio::spawn(ingestor.run());

    let state = AppState::new(&config, feed)?;
    let app = create_router(state);

    // Bind and serve
    let addr = config.listen_addr();
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://localhost:{}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
