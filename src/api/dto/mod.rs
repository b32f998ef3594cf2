//! Data Transfer Objects for API requests and responses.
//!
//! Field names are camelCase on the wire. Request bodies are checked with
//! validator before reaching the service layer.

pub mod health;
pub mod recent;
pub mod redirect;
pub mod shorten;
pub mod url;
