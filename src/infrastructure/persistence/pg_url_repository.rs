//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_code;

/// PostgreSQL repository for URL records.
///
/// Uses SQLx prepared statements; the pool is shared with the rest of the
/// process and hands out connections per query.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UrlRow {
    id: i64,
    short_code: String,
    long_url: String,
    custom_alias: Option<String>,
    created_at: DateTime<Utc>,
    clicks: i64,
}

impl From<UrlRow> for UrlRecord {
    fn from(r: UrlRow) -> Self {
        UrlRecord::new(
            r.id.to_string(),
            r.short_code,
            r.long_url,
            r.custom_alias,
            r.created_at,
            r.clicks,
        )
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (short_code, long_url, custom_alias)
            VALUES ($1, $2, $3)
            RETURNING id, short_code, long_url, custom_alias, created_at, clicks
            "#,
        )
        .bind(&new_record.short_code)
        .bind(&new_record.long_url)
        .bind(&new_record.custom_alias)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_code(&e) {
                AppError::conflict(
                    "Short code already exists",
                    json!({ "shortCode": new_record.short_code }),
                )
            } else {
                AppError::from(e)
            }
        })?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, short_code, long_url, custom_alias, created_at, clicks
            FROM urls
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE urls SET clicks = clicks + 1 WHERE short_code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<UrlRecord>, AppError> {
        let rows = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, short_code, long_url, custom_alias, created_at, clicks
            FROM urls
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit.max(0))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(UrlRecord::from).collect())
    }
}
