//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /create` - Shorten a URL
//! - `GET  /health` - Store health check
//! - `GET  /{id}`   - Redirect to the original URL
//!
//! Static routes win over the `/{id}` capture; generated identifiers never
//! take a reserved route name.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{create_handler, health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Routes and tracing without path normalization.
///
/// Integration tests drive this router directly.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/create", post(create_handler))
        .route("/health", get(health_handler))
        .route("/{id}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(api_router(state))
}
