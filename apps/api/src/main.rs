mod analysis;
mod config;
mod errors;
mod extraction;
mod routes;
mod state;
mod upload;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::DocumentExtractor;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={level},tower_http={level}",
                env!("CARGO_CRATE_NAME"),
                level = &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer API v{}", env!("CARGO_PKG_VERSION"));

    // Uploads are spooled here during extraction and removed right after
    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create upload directory '{}'",
                config.upload_dir.display()
            )
        })?;
    info!("Upload directory: {}", config.upload_dir.display());

    let extractor = Arc::new(DocumentExtractor::new(config.upload_dir.clone()));
    info!(
        "Accepting {:?} uploads up to {} bytes",
        config.allowed_extensions, config.max_upload_bytes
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        extractor,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
