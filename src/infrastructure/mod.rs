//! Infrastructure layer for external integrations.
//!
//! Implements the storage contract defined by the domain layer for each
//! supported backing store.
//!
//! - [`persistence`] - PostgreSQL, MongoDB and in-memory repositories

pub mod persistence;
