//! CLI administration tool for shortlink.
//!
//! Talks to the configured store directly, without going through the HTTP
//! API.
//!
//! # Usage
//!
//! ```bash
//! # Most recent short URLs
//! cargo run --bin admin -- recent --limit 20
//!
//! # Inspect a single code
//! cargo run --bin admin -- show abc123
//!
//! # Create a short URL
//! cargo run --bin admin -- shorten https://example.com --alias my-link
//!
//! # Check store connectivity
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; `DATABASE_URL` selects the store.

use shortlink::application::services::UrlService;
use shortlink::application::services::url_service::DEFAULT_RECENT_LIMIT;
use shortlink::config::{self, Config, mask_connection_string};
use shortlink::domain::entities::UrlRecord;
use shortlink::infrastructure::persistence;
use shortlink::utils::public_url::short_url;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::net::SocketAddr;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// List the most recently created short URLs
    Recent {
        /// Number of records (1-100)
        #[arg(short, long, default_value_t = DEFAULT_RECENT_LIMIT)]
        limit: i64,
    },

    /// Show a single short URL
    Show {
        /// Short code or custom alias
        code: String,
    },

    /// Create a short URL
    Shorten {
        /// Destination URL (http or https)
        url: String,

        /// Custom alias instead of a generated code
        #[arg(short, long)]
        alias: Option<String>,
    },

    /// Store operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Store diagnostic subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check store connectivity
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;

    let repository = persistence::connect(&config)
        .await
        .context("Failed to open store")?;
    let service = UrlService::new(repository);

    match cli.command {
        Commands::Recent { limit } => list_recent(&service, &config, limit).await?,
        Commands::Show { code } => show(&service, &config, &code).await?,
        Commands::Shorten { url, alias } => {
            shorten(&service, &config, &url, alias.as_deref()).await?
        }
        Commands::Db { action } => handle_db_action(action, &service, &config).await?,
    }

    Ok(())
}

/// Base for printed short URLs: `PUBLIC_BASE_URL`, else the listen address.
fn base_url(config: &Config) -> String {
    base_url_for(config.public_base_url.as_deref(), &config.listen_addr)
}

/// A wildcard bind address (`0.0.0.0`, `[::]`) is printed as `localhost`.
fn base_url_for(public_base_url: Option<&str>, listen_addr: &str) -> String {
    if let Some(base) = public_base_url {
        return base.trim_end_matches('/').to_string();
    }

    match listen_addr.parse::<SocketAddr>() {
        Ok(addr) if addr.ip().is_unspecified() => format!("http://localhost:{}", addr.port()),
        _ => format!("http://{listen_addr}"),
    }
}

/// Lists recent records as a table.
///
/// ```text
/// 📋 Recent short URLs
///
///   Code                 Clicks   Created            Destination
///   ─────────────────────────────────────────────────────────────────
///   my-link              12       2025-01-15 10:30   https://example.com
/// ```
async fn list_recent(service: &UrlService, config: &Config, limit: i64) -> Result<()> {
    println!("{}", "📋 Recent short URLs".bright_blue().bold());
    println!();

    let records = service
        .recent(limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list records: {}", e))?;

    if records.is_empty() {
        println!("{}", "  No short URLs yet".yellow());
        println!();
        println!(
            "  Create one with: {} admin shorten <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<20} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Destination".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for record in &records {
        println!(
            "  {:<20} {:<8} {:<18} {}",
            record.short_code.cyan(),
            record.clicks.to_string().bright_green(),
            record
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            record.long_url
        );
    }

    println!();
    println!(
        "  Total: {}   Base: {}",
        records.len().to_string().bright_white().bold(),
        base_url(config).bright_black()
    );
    println!();

    Ok(())
}

async fn show(service: &UrlService, config: &Config, code: &str) -> Result<()> {
    let record = service
        .resolve(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    print_record(&record, config);

    Ok(())
}

async fn shorten(
    service: &UrlService,
    config: &Config,
    url: &str,
    alias: Option<&str>,
) -> Result<()> {
    println!("{}", "✂️  Shorten URL".bright_blue().bold());
    println!();

    let record = service
        .create_short_url(url, alias)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create short URL: {}", e))?;

    println!("{}", "✅ Short URL created".green().bold());
    println!();
    print_record(&record, config);

    Ok(())
}

fn print_record(record: &UrlRecord, config: &Config) {
    let kind = if record.is_custom() { "custom" } else { "generated" };

    println!(
        "  Short URL:   {}",
        short_url(&base_url(config), &record.short_code)
            .bright_yellow()
            .bold()
    );
    println!("  Code:        {} ({})", record.short_code.cyan(), kind);
    println!("  Destination: {}", record.long_url);
    println!(
        "  Clicks:      {}",
        record.clicks.to_string().bright_green().bold()
    );
    println!(
        "  Created:     {}",
        record
            .created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!();
}

/// Handles store diagnostic commands.
async fn handle_db_action(action: DbAction, service: &UrlService, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!(
                "{} {} ({})",
                "🔍 Checking".bright_blue(),
                config.store_kind(),
                mask_connection_string(&config.database_url).bright_black()
            );

            service
                .recent(1)
                .await
                .map_err(|e| anyhow::anyhow!("Store check failed: {}", e))?;

            println!("{}", "✅ Store connection OK".green().bold());
        }
    }

    Ok(())
}
