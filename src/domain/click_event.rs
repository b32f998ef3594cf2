//! Click event model for asynchronous click counting.

use chrono::{DateTime, Utc};

/// A successful redirect lookup waiting to be counted.
///
/// Sent from the redirect-lookup handler to
/// [`crate::domain::click_worker::run_click_worker`] over a bounded channel,
/// so the HTTP response never waits for the counter update.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub code: String,
    pub occurred_at: DateTime<Utc>,
}

impl ClickEvent {
    /// Creates a click event stamped with the current time.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            occurred_at: Utc::now(),
        }
    }
}
