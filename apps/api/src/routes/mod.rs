pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes();

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/extract", post(handlers::handle_extract))
        .route("/api/v1/extract/pdf", post(handlers::handle_extract_pdf))
        .route("/api/v1/validate", post(handlers::handle_validate))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
