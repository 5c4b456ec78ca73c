mod config;
mod db;
mod errors;
mod journal;
mod llm_client;
mod models;
mod progress;
mod reflection;
mod routes;
mod state;
mod store;
mod training;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{JournalStore, MemoryJournalStore, PgJournalStore};

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

    info!("Starting Thought Loop API v{}", env!("CARGO_PKG_VERSION"));

    let store = build_store(&config).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        store,
        llm: Arc::new(llm),
    };

    // The frontend is served from another origin
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// PostgreSQL when `DATABASE_URL` is set, otherwise an in-memory store.
async fn build_store(config: &Config) -> Result<Arc<dyn JournalStore>> {
    match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            run_migrations(&pool).await?;
            Ok(Arc::new(PgJournalStore::new(pool)))
        }
        None => {
            warn!("DATABASE_URL is not set; records are kept in memory and lost on restart");
            Ok(Arc::new(MemoryJournalStore::new()))
        }
    }
}
