pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::documents::handlers;
use crate::state::AppState;

/// Room for multipart boundaries and part headers on top of the document itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_document_bytes + MULTIPART_OVERHEAD;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/upload", get(handlers::handle_upload_page))
        .route("/parse_resume", post(handlers::handle_parse_resume))
        .route("/parse_resume_url", get(handlers::handle_parse_resume_url))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
