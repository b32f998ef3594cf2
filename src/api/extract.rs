//! Request extractors shared by API handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::public_url::base_url_from_request;

/// `scheme://host` of the current request, used to build short URLs.
///
/// Forwarded headers are honoured only when the service is configured to run
/// behind a proxy.
#[derive(Debug, Clone)]
pub struct PublicBaseUrl(pub String);

impl FromRequestParts<AppState> for PublicBaseUrl {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let settings = &state.public_url;

        base_url_from_request(
            &parts.uri,
            &parts.headers,
            settings.behind_proxy,
            settings.fallback_base_url.as_deref(),
        )
        .map(PublicBaseUrl)
    }
}
