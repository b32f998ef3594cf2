//! In-memory implementation of the URL repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Process-local repository backed by a [`DashMap`] keyed by short code.
///
/// DashMap's sharded locks make check-and-insert and counter increments
/// atomic per key without a global lock. Records are lost on restart; use it
/// for development and tests.
#[derive(Debug, Default)]
pub struct InMemoryUrlRepository {
    storage: DashMap<String, UrlRecord>,
    next_id: AtomicU64,
}

impl InMemoryUrlRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        match self.storage.entry(new_record.short_code.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Short code already exists",
                json!({ "shortCode": new_record.short_code }),
            )),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
                let record = UrlRecord::new(
                    id.to_string(),
                    new_record.short_code,
                    new_record.long_url,
                    new_record.custom_alias,
                    Utc::now(),
                    0,
                );
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.storage.get(code).map(|entry| entry.value().clone()))
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), AppError> {
        if let Some(mut entry) = self.storage.get_mut(code) {
            entry.clicks += 1;
        }

        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<UrlRecord>, AppError> {
        let limit = usize::try_from(limit).unwrap_or(0);

        let mut records: Vec<UrlRecord> = self
            .storage
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        // Ids are a monotonic sequence, so they break timestamp ties in
        // insertion order.
        records.sort_by(|a, b| {
            b.created_at.cmp(&a.created_at).then_with(|| {
                let a_id = a.id.parse::<u64>().unwrap_or(0);
                let b_id = b.id.parse::<u64>().unwrap_or(0);
                b_id.cmp(&a_id)
            })
        });
        records.truncate(limit);

        Ok(records)
    }
}
