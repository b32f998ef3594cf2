//! Handler for the shorten endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::shorten::ShortenRequest;
use crate::api::dto::url::UrlResponse;
use crate::api::extract::PublicBaseUrl;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "longUrl": "https://example.com/page", "customAlias": "my-link" }
/// ```
///
/// # Response
///
/// `201 Created` with the stored record and its `shortUrl`:
///
/// ```json
/// {
///   "id": "1",
///   "shortCode": "my-link",
///   "longUrl": "https://example.com/page",
///   "customAlias": "my-link",
///   "shortUrl": "http://localhost:3000/my-link",
///   "createdAt": "2025-01-01T00:00:00Z",
///   "clicks": 0
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed body, an invalid URL, an invalid
/// alias or an alias that is already taken.
pub async fn shorten_handler(
    State(state): State<AppState>,
    PublicBaseUrl(base_url): PublicBaseUrl,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UrlResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let record = state
        .url_service
        .create_short_url(&payload.long_url, payload.custom_alias.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UrlResponse::from_record(record, &base_url)),
    ))
}
