//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{shortcode}`            - Redirect to the original URL
//! - `GET  /health`                 - Health check: registry, audit queue
//! - `POST /shorturls`              - Create a shortcode
//! - `GET  /shorturls/{shortcode}`  - Shortcode statistics
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// `state` is injected into all handlers. Redirects need the peer address,
/// so the router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/{shortcode}", get(redirect_handler))
        .route("/health", get(health_handler))
        .merge(api::routes::shorturl_routes())
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
