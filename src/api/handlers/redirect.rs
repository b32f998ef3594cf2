//! Handler for short code resolution.

use axum::{
    Json,
    extract::{Path, State},
};
use tokio::sync::mpsc::error::TrySendError;

use crate::api::dto::redirect::RedirectResponse;
use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a short code to its destination and records a click.
///
/// # Endpoint
///
/// `GET /api/redirect/{short_code}`
///
/// # Response
///
/// ```json
/// { "longUrl": "https://example.com/page" }
/// ```
///
/// # Click Tracking
///
/// The increment is queued after the response is built and applied by the
/// background worker, so the lookup never waits on the counter update. When
/// the queue is full the click is dropped with a warning.
///
/// # Errors
///
/// Returns 404 Not Found if no record matches the code.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<RedirectResponse>, AppError> {
    let record = state.url_service.resolve(&short_code).await?;

    let response = Json(RedirectResponse {
        long_url: record.long_url,
    });

    match state.click_sender.try_send(ClickEvent::new(record.short_code)) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            tracing::warn!(code = %event.code, "Click queue full, dropping click");
        }
        Err(TrySendError::Closed(event)) => {
            tracing::warn!(code = %event.code, "Click queue closed, dropping click");
        }
    }

    Ok(response)
}
