//! Core domain entities.
//!
//! - [`UrlRecord`] - A stored short code mapping
//! - [`NewUrlRecord`] - Insert input; the store fills in id, timestamp and counter

pub mod url_record;

pub use url_record::{NewUrlRecord, UrlRecord};
