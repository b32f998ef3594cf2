//! Domain layer containing business entities and storage contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Click counting event model
//! - [`click_worker`] - Asynchronous click counting worker
//!
//! # Click Processing Flow
//!
//! 1. Redirect-lookup handler resolves the short code
//! 2. A [`click_event::ClickEvent`] is offered to a bounded channel
//! 3. [`click_worker::run_click_worker`] applies the increment
//! 4. Failures are logged and dropped

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
