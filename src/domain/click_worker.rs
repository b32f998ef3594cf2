//! Background worker applying click increments.
//!
//! Increments are best-effort: a failed update is logged and dropped, never
//! retried. The worker exits when every sender has been dropped and all
//! in-flight increments have finished.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::UrlRepository;

/// Consumes click events and increments the matching counters.
///
/// At most `concurrency` increments run at once.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    repository: Arc<dyn UrlRepository>,
    concurrency: usize,
) {
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut in_flight = JoinSet::new();

    info!(concurrency, "Click worker running");

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };

        let repository = repository.clone();
        in_flight.spawn(async move {
            let _permit = permit;
            apply_click(repository.as_ref(), event).await;
        });

        // Reap finished tasks so the set does not grow unbounded.
        while in_flight.try_join_next().is_some() {}
    }

    while in_flight.join_next().await.is_some() {}

    info!("Click worker stopped");
}

/// Applies a single increment, logging failures.
pub async fn apply_click(repository: &dyn UrlRepository, event: ClickEvent) {
    match repository.increment_clicks(&event.code).await {
        Ok(()) => debug!(code = %event.code, "Click recorded"),
        Err(e) => error!(
            code = %event.code,
            occurred_at = %event.occurred_at,
            "Failed to record click: {}",
            e
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;
    use crate::error::AppError;
    use serde_json::Value;

    #[tokio::test]
    async fn test_worker_increments_each_event() {
        let mut repo = MockUrlRepository::new();
        repo.expect_increment_clicks()
            .withf(|code| code == "abc123")
            .times(3)
            .returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(16);
        for _ in 0..3 {
            tx.send(ClickEvent::new("abc123")).await.unwrap();
        }
        drop(tx);

        run_click_worker(rx, Arc::new(repo), 2).await;
    }

    #[tokio::test]
    async fn test_worker_survives_failures() {
        let mut repo = MockUrlRepository::new();
        repo.expect_increment_clicks()
            .times(2)
            .returning(|_| Err(AppError::internal("Database error", Value::Null)));

        let (tx, rx) = mpsc::channel(16);
        tx.send(ClickEvent::new("a")).await.unwrap();
        tx.send(ClickEvent::new("b")).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(repo), 1).await;
    }

    #[tokio::test]
    async fn test_worker_stops_when_channel_closes() {
        let repo = MockUrlRepository::new();
        let (tx, rx) = mpsc::channel::<ClickEvent>(1);
        drop(tx);

        run_click_worker(rx, Arc::new(repo), 4).await;
    }
}
