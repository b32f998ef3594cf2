//! DTO for the redirect lookup endpoint.

use serde::Serialize;

/// Destination of a short code. The client performs the navigation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectResponse {
    pub long_url: String,
}
