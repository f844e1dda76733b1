mod config;
mod documents;
mod errors;
mod routes;
mod skills;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::documents::fetch::ReferenceFetcher;
use crate::routes::build_router;
use crate::skills::Vocabulary;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Skill Scan API v{}", env!("CARGO_PKG_VERSION"));

    let vocabulary = Vocabulary::builtin().context("Failed to compile skill vocabulary")?;
    if vocabulary.is_empty() {
        anyhow::bail!("Skill vocabulary is empty");
    }
    info!("Skill vocabulary loaded ({} terms)", vocabulary.len());

    let fetcher = ReferenceFetcher::new(&config)?;
    match &config.local_document_root {
        Some(root) => info!("Local document references confined to {}", root.display()),
        None => warn!("LOCAL_DOCUMENT_ROOT not set; local document references are disabled"),
    }

    let state = AppState {
        config: config.clone(),
        vocabulary: Arc::new(vocabulary),
        fetcher: Arc::new(fetcher),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("HOST and PORT must form a valid socket address")?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
