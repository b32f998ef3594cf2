//! API route configuration.

use crate::api::handlers::{
    api_not_found_handler, recent_handler, redirect_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`                 - Create a short URL
/// - `GET  /redirect/{short_code}`   - Resolve a code and count the click
/// - `GET  /urls/recent`             - Most recent short URLs
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/redirect/{short_code}", get(redirect_handler))
        .route("/urls/recent", get(recent_handler))
        .fallback(api_not_found_handler)
}
