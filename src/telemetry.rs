//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `filter` uses `RUST_LOG` syntax (`info`, `shortlink=debug,tower_http=info`).
/// `format` is `json` for one JSON object per line, anything else for
/// human-readable text.
pub fn init(filter: &str, format: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    if format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
