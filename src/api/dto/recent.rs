//! Query parameters for the recent URLs listing.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::application::services::url_service::DEFAULT_RECENT_LIMIT;

/// `?limit=N`, defaulting to [`DEFAULT_RECENT_LIMIT`].
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct RecentQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,
}

impl RecentQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_RECENT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::Uri;

    fn parse(uri: &str) -> Result<RecentQuery, String> {
        let uri: Uri = uri.parse().unwrap();
        Query::<RecentQuery>::try_from_uri(&uri)
            .map(|Query(q)| q)
            .map_err(|e| e.body_text())
    }

    #[test]
    fn test_default_limit() {
        assert_eq!(parse("/api/urls/recent").unwrap().limit(), 10);
    }

    #[test]
    fn test_explicit_limit() {
        assert_eq!(parse("/api/urls/recent?limit=25").unwrap().limit(), 25);
    }

    #[test]
    fn test_non_numeric_limit_rejected() {
        assert!(parse("/api/urls/recent?limit=lots").is_err());
    }
}
