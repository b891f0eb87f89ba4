mod config;
mod db;
mod errors;
mod extraction;
mod matching;
mod models;
mod oracle;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::extraction::TextFeatureExtractor;
use crate::matching::engine::SimilarityEngine;
use crate::oracle::{HuggingFaceOracle, OracleConfig, SimilarityOracle};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::memory::InMemoryMatchStore;
use crate::store::postgres::PgMatchStore;
use crate::store::MatchStore;

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

    info!("Starting JobFit matcher v{}", env!("CARGO_PKG_VERSION"));

    // Initialize result store
    let store: Arc<dyn MatchStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            ensure_schema(&pool).await?;
            Arc::new(PgMatchStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set; match results are kept in memory only");
            Arc::new(InMemoryMatchStore::new())
        }
    };

    // Initialize similarity oracle
    let oracle: Arc<dyn SimilarityOracle> = Arc::new(
        HuggingFaceOracle::new(OracleConfig {
            api_url: config.hf_api_url.clone(),
            api_token: config.hf_api_token.clone(),
            similarity_model: config.hf_similarity_model.clone(),
            ner_model: config.hf_ner_model.clone(),
            timeout: Duration::from_secs(config.oracle_timeout_secs),
            max_attempts: config.oracle_max_attempts,
        })
        .context("Failed to build oracle HTTP client")?,
    );
    info!(
        "Oracle client initialized (similarity: {}, ner: {})",
        config.hf_similarity_model, config.hf_ner_model
    );

    // Initialize engine
    let engine = SimilarityEngine::new(
        TextFeatureExtractor::new(oracle.clone()),
        oracle,
        store,
        config.semantic_similarity_enabled,
    );
    info!(
        "Semantic similarity {}",
        if config.semantic_similarity_enabled {
            "enabled"
        } else {
            "disabled"
        }
    );

    // Build app state
    let state = AppState {
        engine: Arc::new(engine),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins to the frontend host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
