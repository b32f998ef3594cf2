//! Repository implementations and store connection.
//!
//! - [`PgUrlRepository`] - PostgreSQL via SQLx
//! - [`MongoUrlRepository`] - MongoDB via the official driver
//! - [`InMemoryUrlRepository`] - Process-local DashMap
//!
//! [`connect`] picks one from the configured connection string and returns it
//! as the single shared handle for the process.

pub mod memory_url_repository;
pub mod mongo_url_repository;
pub mod pg_url_repository;

pub use memory_url_repository::InMemoryUrlRepository;
pub use mongo_url_repository::MongoUrlRepository;
pub use pg_url_repository::PgUrlRepository;

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, StoreKind};
use crate::domain::repositories::UrlRepository;

/// Builds the repository selected by `config.database_url`.
///
/// - **Postgres**: a lazily connecting pool; pending migrations are applied
///   before returning
/// - **MongoDB**: a driver client (pooled internally); the `shortCode` unique
///   index is ensured
/// - **Memory**: an empty in-process map
///
/// # Errors
///
/// Returns an error if the connection string is invalid, migrations fail or
/// the MongoDB indexes cannot be created.
pub async fn connect(config: &Config) -> Result<Arc<dyn UrlRepository>> {
    match config.store_kind() {
        StoreKind::Postgres => {
            let pool = pg_pool(config)?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Connected to PostgreSQL, migrations applied");

            Ok(Arc::new(PgUrlRepository::new(Arc::new(pool))))
        }
        StoreKind::MongoDb => {
            let client = mongodb::Client::with_uri_str(&config.database_url)
                .await
                .context("Invalid MongoDB connection string")?;

            let database = client
                .default_database()
                .map(|db| db.name().to_string())
                .unwrap_or_else(|| config.mongodb_database.clone());

            let repository = MongoUrlRepository::new(&client, &database)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to prepare MongoDB collection: {}", e))?;
            tracing::info!(database = %database, "Connected to MongoDB");

            Ok(Arc::new(repository))
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory store; records are lost on restart");
            Ok(Arc::new(InMemoryUrlRepository::new()))
        }
    }
}

/// Creates the Postgres pool from config without opening a connection.
///
/// Connections are established on first use and recycled according to the
/// `DB_*` pool settings.
pub fn pg_pool(config: &Config) -> Result<sqlx::PgPool> {
    let options = PgConnectOptions::from_str(&config.database_url)
        .context("Invalid PostgreSQL connection string")?;

    Ok(PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect_lazy_with(options))
}
