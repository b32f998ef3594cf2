//! Handler for the recent URLs listing.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::api::dto::recent::RecentQuery;
use crate::api::dto::url::UrlResponse;
use crate::api::extract::PublicBaseUrl;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the most recently created short URLs, newest first.
///
/// # Endpoint
///
/// `GET /api/urls/recent?limit=N`
///
/// # Query Parameters
///
/// - `limit` - number of records, `1..=100` (default: 10)
///
/// # Errors
///
/// Returns 400 Bad Request if `limit` is not an integer in range.
pub async fn recent_handler(
    State(state): State<AppState>,
    PublicBaseUrl(base_url): PublicBaseUrl,
    query: Result<Query<RecentQuery>, QueryRejection>,
) -> Result<Json<Vec<UrlResponse>>, AppError> {
    let Query(query) = query?;

    let records = state.url_service.recent(query.limit()).await?;

    Ok(Json(
        records
            .into_iter()
            .map(|record| UrlResponse::from_record(record, &base_url))
            .collect(),
    ))
}
