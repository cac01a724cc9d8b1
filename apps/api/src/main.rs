mod config;
mod db;
mod dictionaries;
mod errors;
mod interpreter;
mod matching;
mod models;
mod recommender;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::dictionaries::EngineDictionaries;
use crate::interpreter::document::HttpDocumentFetcher;
use crate::routes::build_router;
use crate::state::AppState;

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

    info!("Starting career guidance API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize the resume document fetcher
    let fetcher = Arc::new(HttpDocumentFetcher::new(Duration::from_secs(
        config.fetch_timeout_secs,
    ))?);
    info!("Document fetcher initialized");

    // Engine dictionaries: static defaults at startup, injectable in tests
    let dictionaries = Arc::new(EngineDictionaries::default());
    info!(
        "Dictionaries loaded ({} skill phrases, {} catalog skills)",
        dictionaries.skills.phrases.len(),
        dictionaries.catalog.skills.len()
    );

    // Build app state
    let state = AppState {
        db,
        fetcher,
        dictionaries,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
