use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app_extractor::config::Config;
use app_extractor::extraction::validation::StructuralValidator;
use app_extractor::routes::build_router;
use app_extractor::state::AppState;
use app_extractor::text_source::PdfTextExtractor;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("app_extractor={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting APP extractor v{}", env!("CARGO_PKG_VERSION"));
    info!("Upload limit: {} MB", config.max_file_size_mb);

    let state = AppState {
        config: config.clone(),
        text_extractor: Arc::new(PdfTextExtractor),
        validator: Arc::new(StructuralValidator),
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
