//! Web server module for receiving signed webhooks.
//!
//! This module provides a thin web server that:
//! - Authenticates every webhook with [`crate::signature::validate_request`]
//! - Answers 401 without detail on any rejection
//! - Hands authenticated payloads to the handler

pub mod handlers;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{
    content_status_webhook, health, AppState, ContentStatusUpdate, HealthResponse,
    WebhookResponse,
};

/// Build the application router.
pub fn router(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/webhooks/content-status", post(content_status_webhook))
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
