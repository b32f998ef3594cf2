//! Repository trait for short URL data access.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for URL records.
///
/// Every backing store implements exactly these four operations. Uniqueness
/// of `short_code` is enforced by the store itself.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MongoUrlRepository`] - MongoDB
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - process memory
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new record with `clicks = 0` and `created_at = now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code already exists.
    /// Returns [`AppError::Internal`] on store errors.
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Finds a record by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlRecord))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Adds one to the record's click counter.
    ///
    /// Unknown codes are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn increment_clicks(&self, code: &str) -> Result<(), AppError>;

    /// Lists at most `limit` records, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn list_recent(&self, limit: i64) -> Result<Vec<UrlRecord>, AppError>;
}
