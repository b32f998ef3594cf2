//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/api/*`   - JSON API
//! - `GET /health` - Store and click queue health
//! - anything else - Static front-end bundle, when a directory is configured
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash trimming

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use std::path::Path;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `static_dir` - directory holding the built front-end; unknown non-API
///   paths fall back to its `index.html` so client-side routes such as
///   `/abc123` load the page that performs the lookup
pub fn app_router(state: AppState, static_dir: Option<&str>) -> NormalizePath<Router> {
    let mut router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes());

    if let Some(dir) = static_dir {
        let index = Path::new(dir).join("index.html");
        router = router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    let router = router.with_state(state).layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
