//! Outbound representation of a stored URL record.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::UrlRecord;
use crate::utils::public_url::short_url;

/// A URL record as returned by the API, with its public short URL.
///
/// `shortUrl` is derived from the request that produced the response and is
/// never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlResponse {
    pub id: String,
    pub short_code: String,
    pub long_url: String,
    pub custom_alias: Option<String>,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
}

impl UrlResponse {
    pub fn from_record(record: UrlRecord, base_url: &str) -> Self {
        let short_url = short_url(base_url, &record.short_code);

        Self {
            id: record.id,
            short_code: record.short_code,
            long_url: record.long_url,
            custom_alias: record.custom_alias,
            short_url,
            created_at: record.created_at,
            clicks: record.clicks,
        }
    }
}
