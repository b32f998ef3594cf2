//! DTOs for the shorten endpoint.

use serde::{Deserialize, Deserializer};
use validator::Validate;

/// Request to shorten a single URL.
///
/// ```json
/// { "longUrl": "https://example.com/some/long/path", "customAlias": "my-link" }
/// ```
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// Destination URL. Scheme and host are checked by the service.
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub long_url: String,

    /// Optional human-chosen code. Blank strings and `null` count as absent.
    ///
    /// Length, charset and reserved names are checked by
    /// [`crate::utils::code_generator::validate_custom_alias`].
    #[serde(default, deserialize_with = "blank_as_none")]
    pub custom_alias: Option<String>,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;

    Ok(value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty()))
}
