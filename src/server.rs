//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, worker spawning, and Axum server lifecycle.

use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::infrastructure::persistence;
use crate::routes::app_router;
use crate::state::{AppState, PublicUrlSettings};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The storage backend selected by `DATABASE_URL`
/// - Background click worker
/// - Axum HTTP server with graceful shutdown
///
/// On shutdown the server stops accepting connections, finishes in-flight
/// requests and waits for queued clicks to be applied.
///
/// # Errors
///
/// Returns an error if:
/// - The store cannot be prepared
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = persistence::connect(&config).await?;

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);

    let worker = tokio::spawn(run_click_worker(
        click_rx,
        repository.clone(),
        config.click_worker_concurrency,
    ));
    tracing::info!("Click worker started");

    let state = AppState::new(repository, click_tx, PublicUrlSettings::from(&config));

    let app = app_router(state, config.static_dir.as_deref());

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address: {}", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router and its senders are gone; the worker drains and exits.
    if let Err(e) = worker.await {
        tracing::error!("Click worker panicked: {}", e);
    }

    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
