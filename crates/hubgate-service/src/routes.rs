//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::routing::{any, get};
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{health, webhooks};
use crate::state::AppState;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Webhooks (Signature verification)
/// - `POST <webhook_path>` - Verified deliveries (default `/webhooks/github`)
///
/// The webhook route accepts every method so the gate, not the router,
/// answers non-POST requests.
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let webhook_path = state.config.webhook_path.clone();
    let request_timeout_seconds = state.config.request_timeout_seconds;
    let max_body_bytes = state.config.max_body_bytes;
    let gate = state.verifier.layer();

    let state = Arc::new(state);

    let webhook_routes = Router::new()
        .route(&webhook_path, any(webhooks::receive))
        .route_layer(gate)
        // The receiver's `Bytes` extractor gets the same cap as the gate
        .layer(DefaultBodyLimit::max(max_body_bytes));

    Router::new()
        // Health (public)
        .route("/health", get(health::health))
        // Webhooks (gated)
        .merge(webhook_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}
