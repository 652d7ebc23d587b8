mod analysis;
mod config;
mod db;
mod errors;
mod insights;
mod llm_client;
mod models;
mod pipeline;
mod routes;
mod sources;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::ProviderChain;
use crate::pipeline::Pipeline;
use crate::routes::build_router;
use crate::sources::RedditFetcher;
use crate::state::AppState;
use crate::store::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ReviewLens API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgStore::new(db));

    // Initialize provider chain (primary first, then secondary)
    let providers = ProviderChain::from_config(&config.providers);
    if providers.is_empty() {
        warn!("No provider API keys configured, every request will use fallback content");
    } else {
        let names: Vec<&str> = providers.providers().iter().map(|p| p.name()).collect();
        info!("Provider chain: {}", names.join(" -> "));
    }

    let fetcher = Arc::new(RedditFetcher::new(config.reddit_base_url.clone()));
    let pipeline = Pipeline::new(
        store.clone(),
        fetcher,
        providers,
        config.topics.clone(),
        config.topic_interval,
    );

    let state = AppState {
        store,
        pipeline: Arc::new(pipeline),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
