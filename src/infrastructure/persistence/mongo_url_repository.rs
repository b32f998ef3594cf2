//! MongoDB implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::db_error::is_mongo_duplicate_key;

/// Collection holding URL documents.
pub const URLS_COLLECTION: &str = "urls";

/// Document layout of the `urls` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UrlDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    short_code: String,
    long_url: String,
    #[serde(default)]
    custom_alias: Option<String>,
    created_at: bson::DateTime,
    #[serde(default)]
    clicks: i64,
}

impl UrlDocument {
    fn into_record(self) -> UrlRecord {
        let created_at = DateTime::<Utc>::from_timestamp_millis(self.created_at.timestamp_millis())
            .unwrap_or_default();

        UrlRecord::new(
            self.id.map(|id| id.to_hex()).unwrap_or_default(),
            self.short_code,
            self.long_url,
            self.custom_alias,
            created_at,
            self.clicks,
        )
    }
}

/// MongoDB repository for URL records.
///
/// The driver's [`Client`] pools connections internally and is cheap to
/// clone; one instance is shared by the whole process.
pub struct MongoUrlRepository {
    collection: Collection<UrlDocument>,
}

impl MongoUrlRepository {
    /// Opens the `urls` collection in `database` and ensures the unique index
    /// on `shortCode` exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the index cannot be created.
    pub async fn new(client: &Client, database: &str) -> Result<Self, AppError> {
        let collection = client
            .database(database)
            .collection::<UrlDocument>(URLS_COLLECTION);

        let unique_code = IndexModel::builder()
            .keys(doc! { "shortCode": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let recent = IndexModel::builder()
            .keys(doc! { "createdAt": -1 })
            .build();

        collection.create_index(unique_code).await?;
        collection.create_index(recent).await?;

        Ok(Self { collection })
    }
}

#[async_trait]
impl UrlRepository for MongoUrlRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let mut document = UrlDocument {
            id: None,
            short_code: new_record.short_code,
            long_url: new_record.long_url,
            custom_alias: new_record.custom_alias,
            created_at: bson::DateTime::from_millis(Utc::now().timestamp_millis()),
            clicks: 0,
        };

        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(|e| {
                if is_mongo_duplicate_key(&e) {
                    AppError::conflict(
                        "Short code already exists",
                        json!({ "shortCode": document.short_code }),
                    )
                } else {
                    AppError::from(e)
                }
            })?;

        document.id = result.inserted_id.as_object_id();

        Ok(document.into_record())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let document = self
            .collection
            .find_one(doc! { "shortCode": code })
            .await?;

        Ok(document.map(UrlDocument::into_record))
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), AppError> {
        self.collection
            .update_one(doc! { "shortCode": code }, doc! { "$inc": { "clicks": 1_i64 } })
            .await?;

        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<UrlRecord>, AppError> {
        // A zero limit means "no limit" to the server.
        if limit <= 0 {
            return Ok(Vec::new());
        }

        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .limit(limit)
            .await?;

        let documents: Vec<UrlDocument> = cursor.try_collect().await?;

        Ok(documents
            .into_iter()
            .map(UrlDocument::into_record)
            .collect())
    }
}
