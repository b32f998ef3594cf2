#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, routing::get};
use serde_json::json;
use shortlink::api::handlers::health_handler;
use shortlink::api::routes::api_routes;
use shortlink::domain::click_event::ClickEvent;
use shortlink::domain::entities::{NewUrlRecord, UrlRecord};
use shortlink::domain::repositories::UrlRepository;
use shortlink::error::AppError;
use shortlink::infrastructure::persistence::InMemoryUrlRepository;
use shortlink::state::{AppState, PublicUrlSettings};
use std::sync::Arc;
use tokio::sync::mpsc;

pub const TEST_HOST: &str = "sho.rt";

pub fn create_test_state(
    repository: Arc<dyn UrlRepository>,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(repository, tx, PublicUrlSettings::default());

    (state, rx)
}

/// API and health routes over a fresh in-memory store.
pub fn create_test_app() -> (
    Router,
    Arc<InMemoryUrlRepository>,
    mpsc::Receiver<ClickEvent>,
) {
    let repository = Arc::new(InMemoryUrlRepository::new());
    let (state, rx) = create_test_state(repository.clone());

    (router_with_state(state), repository, rx)
}

pub fn router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_routes())
        .with_state(state)
}

pub async fn insert_url(repository: &InMemoryUrlRepository, code: &str, url: &str) {
    repository
        .insert(NewUrlRecord::generated(code.to_string(), url.to_string()))
        .await
        .unwrap();
}

/// Store whose every operation fails, standing in for an unreachable database.
pub struct FailingUrlRepository;

impl FailingUrlRepository {
    fn error() -> AppError {
        AppError::internal(
            "Database error",
            json!({ "cause": "connection refused (secret-host:5432)" }),
        )
    }
}

#[async_trait]
impl UrlRepository for FailingUrlRepository {
    async fn insert(&self, _new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        Err(Self::error())
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<UrlRecord>, AppError> {
        Err(Self::error())
    }

    async fn increment_clicks(&self, _code: &str) -> Result<(), AppError> {
        Err(Self::error())
    }

    async fn list_recent(&self, _limit: i64) -> Result<Vec<UrlRecord>, AppError> {
        Err(Self::error())
    }
}

/// API and health routes over a store that always fails.
pub fn create_failing_app() -> (Router, mpsc::Receiver<ClickEvent>) {
    let (state, rx) = create_test_state(Arc::new(FailingUrlRepository));

    (router_with_state(state), rx)
}
