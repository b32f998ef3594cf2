//! URL record entity representing a short code mapping.

use chrono::{DateTime, Utc};

/// A stored short code → long URL mapping.
///
/// `id` is assigned by the backing store and is opaque to everything above
/// the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: String,
    pub short_code: String,
    pub long_url: String,
    pub custom_alias: Option<String>,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        id: impl Into<String>,
        short_code: String,
        long_url: String,
        custom_alias: Option<String>,
        created_at: DateTime<Utc>,
        clicks: i64,
    ) -> Self {
        Self {
            id: id.into(),
            short_code,
            long_url,
            custom_alias,
            created_at,
            clicks,
        }
    }

    /// Returns true if the short code was chosen by the user.
    pub fn is_custom(&self) -> bool {
        self.custom_alias.is_some()
    }
}

/// Input data for inserting a new record.
///
/// The store assigns `id`, `created_at` and starts `clicks` at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub short_code: String,
    pub long_url: String,
    pub custom_alias: Option<String>,
}

impl NewUrlRecord {
    /// Record with a system-generated code.
    pub fn generated(short_code: String, long_url: String) -> Self {
        Self {
            short_code,
            long_url,
            custom_alias: None,
        }
    }

    /// Record whose code is the user's alias.
    pub fn with_alias(alias: String, long_url: String) -> Self {
        Self {
            short_code: alias.clone(),
            long_url,
            custom_alias: Some(alias),
        }
    }
}
