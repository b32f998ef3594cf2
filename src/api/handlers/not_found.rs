//! Fallback for unknown API paths.

use serde_json::json;

use crate::error::AppError;

/// Answers unmatched `/api/*` requests with a JSON 404.
pub async fn api_not_found_handler(uri: axum::http::Uri) -> AppError {
    AppError::not_found("Route not found", json!({ "path": uri.path() }))
}
