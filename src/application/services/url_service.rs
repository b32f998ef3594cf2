//! Short URL creation and lookup service.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, generate_code, validate_custom_alias};
use crate::utils::url_validator::validate_long_url;

/// Attempts made to insert a generated code before giving up.
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Default number of records returned by [`UrlService::recent`].
pub const DEFAULT_RECENT_LIMIT: i64 = 10;

/// Upper bound accepted by [`UrlService::recent`].
pub const MAX_RECENT_LIMIT: i64 = 100;

/// Service for creating and resolving short URLs.
///
/// Holds the shared repository handle; cloning the service is cheap.
#[derive(Clone)]
pub struct UrlService {
    repository: Arc<dyn UrlRepository>,
}

impl UrlService {
    /// Creates a new URL service.
    pub fn new(repository: Arc<dyn UrlRepository>) -> Self {
        Self { repository }
    }

    /// Creates a short URL for `long_url`.
    ///
    /// # Code Selection
    ///
    /// - If `custom_alias` is provided (and not blank), validates it and checks
    ///   availability before inserting
    /// - Otherwise, generates a random 6-character code; a store-reported
    ///   duplicate key triggers a fresh code, up to
    ///   [`MAX_GENERATION_ATTEMPTS`] times
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or alias is malformed.
    /// Returns [`AppError::DuplicateAlias`] if the alias is already taken.
    /// Returns [`AppError::Internal`] on store errors or when every generated
    /// code collided.
    pub async fn create_short_url(
        &self,
        long_url: &str,
        custom_alias: Option<&str>,
    ) -> Result<UrlRecord, AppError> {
        let long_url = validate_long_url(long_url).map_err(|e| {
            AppError::bad_request(e.to_string(), json!({ "longUrl": long_url }))
        })?;

        let custom_alias = custom_alias.map(str::trim).filter(|a| !a.is_empty());

        let record = match custom_alias {
            Some(alias) => self.insert_with_alias(long_url, alias).await?,
            None => self.insert_generated(long_url).await?,
        };

        info!(
            code = %record.short_code,
            custom = record.is_custom(),
            "Short URL created"
        );

        Ok(record)
    }

    /// Resolves a short code to its record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches the code.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn resolve(&self, code: &str) -> Result<UrlRecord, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "shortCode": code })))
    }

    /// Lists the most recently created records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `limit` is outside `1..=100`.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn recent(&self, limit: i64) -> Result<Vec<UrlRecord>, AppError> {
        if !(1..=MAX_RECENT_LIMIT).contains(&limit) {
            return Err(AppError::bad_request(
                format!("Limit must be between 1 and {}", MAX_RECENT_LIMIT),
                json!({ "limit": limit }),
            ));
        }

        self.repository.list_recent(limit).await
    }

    async fn insert_with_alias(&self, long_url: &str, alias: &str) -> Result<UrlRecord, AppError> {
        validate_custom_alias(alias)?;

        if self.repository.find_by_code(alias).await?.is_some() {
            return Err(AppError::duplicate_alias(alias));
        }

        let new_record = NewUrlRecord::with_alias(alias.to_string(), long_url.to_string());

        match self.repository.insert(new_record).await {
            Err(AppError::Conflict { .. }) => Err(AppError::duplicate_alias(alias)),
            other => other,
        }
    }

    async fn insert_generated(&self, long_url: &str) -> Result<UrlRecord, AppError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let code = generate_code(DEFAULT_CODE_LENGTH);
            let new_record = NewUrlRecord::generated(code, long_url.to_string());

            match self.repository.insert(new_record).await {
                Err(AppError::Conflict { .. }) => {
                    warn!(attempt, "Generated short code collided, retrying");
                }
                other => return other,
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;
    use crate::utils::code_generator::is_url_safe;
    use chrono::Utc;
    use serde_json::Value;

    fn stored(record: NewUrlRecord) -> UrlRecord {
        UrlRecord::new(
            "42",
            record.short_code,
            record.long_url,
            record.custom_alias,
            Utc::now(),
            0,
        )
    }

    fn service(repo: MockUrlRepository) -> UrlService {
        UrlService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_create_generated_code() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_code().times(0);
        repo.expect_insert()
            .withf(|r| r.short_code.len() == 6 && r.custom_alias.is_none())
            .times(1)
            .returning(|r| Ok(stored(r)));

        let record = service(repo)
            .create_short_url("https://example.com/a", None)
            .await
            .unwrap();

        assert_eq!(record.short_code.len(), 6);
        assert!(is_url_safe(&record.short_code));
        assert_eq!(record.long_url, "https://example.com/a");
        assert_eq!(record.clicks, 0);
    }

    #[tokio::test]
    async fn test_blank_alias_is_treated_as_absent() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_code().times(0);
        repo.expect_insert()
            .withf(|r| r.custom_alias.is_none())
            .times(1)
            .returning(|r| Ok(stored(r)));

        let result = service(repo)
            .create_short_url("https://example.com", Some("   "))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_with_custom_alias() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_code()
            .withf(|code| code == "my-link")
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|r| r.short_code == "my-link" && r.custom_alias.as_deref() == Some("my-link"))
            .times(1)
            .returning(|r| Ok(stored(r)));

        let record = service(repo)
            .create_short_url("https://example.com/b", Some("my-link"))
            .await
            .unwrap();

        assert_eq!(record.short_code, "my-link");
        assert_eq!(record.custom_alias.as_deref(), Some("my-link"));
    }

    #[tokio::test]
    async fn test_taken_alias_is_rejected_without_insert() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_code().times(1).returning(|code| {
            Ok(Some(UrlRecord::new(
                "1",
                code.to_string(),
                "https://other.com".to_string(),
                Some(code.to_string()),
                Utc::now(),
                3,
            )))
        });
        repo.expect_insert().times(0);

        let err = service(repo)
            .create_short_url("https://example.com", Some("taken"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DuplicateAlias { .. }));
    }

    #[tokio::test]
    async fn test_alias_race_maps_store_conflict_to_duplicate_alias() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_code().times(1).returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(AppError::conflict("Unique constraint violation", Value::Null)));

        let err = service(repo)
            .create_short_url("https://example.com", Some("racy"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DuplicateAlias { .. }));
    }

    #[tokio::test]
    async fn test_invalid_alias_never_touches_store() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_code().times(0);
        repo.expect_insert().times(0);

        let err = service(repo)
            .create_short_url("https://example.com", Some("no spaces!"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let mut repo = MockUrlRepository::new();
        repo.expect_insert().times(0);

        let err = service(repo)
            .create_short_url("not-a-url", None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_generated_collision_is_retried() {
        let mut repo = MockUrlRepository::new();
        let mut seq = mockall::Sequence::new();
        repo.expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::conflict("Unique constraint violation", Value::Null)));
        repo.expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|r| Ok(stored(r)));

        let result = service(repo)
            .create_short_url("https://example.com", None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_generated_collisions_exhaust_attempts() {
        let mut repo = MockUrlRepository::new();
        repo.expect_insert()
            .times(MAX_GENERATION_ATTEMPTS)
            .returning(|_| Err(AppError::conflict("Unique constraint violation", Value::Null)));

        let err = service(repo)
            .create_short_url("https://example.com", None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_store_error_is_not_retried() {
        let mut repo = MockUrlRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", Value::Null)));

        let err = service(repo)
            .create_short_url("https://example.com", None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_code().times(1).returning(|_| Ok(None));

        let err = service(repo).resolve("missing").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_recent_validates_limit() {
        let mut repo = MockUrlRepository::new();
        repo.expect_list_recent().times(0);
        let service = service(repo);

        assert!(matches!(
            service.recent(0).await.unwrap_err(),
            AppError::Validation { .. }
        ));
        assert!(matches!(
            service.recent(MAX_RECENT_LIMIT + 1).await.unwrap_err(),
            AppError::Validation { .. }
        ));
    }

    #[tokio::test]
    async fn test_recent_delegates_limit() {
        let mut repo = MockUrlRepository::new();
        repo.expect_list_recent()
            .withf(|limit| *limit == 10)
            .times(1)
            .returning(|_| Ok(vec![]));

        let records = service(repo).recent(DEFAULT_RECENT_LIMIT).await.unwrap();
        assert!(records.is_empty());
    }
}
