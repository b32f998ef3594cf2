//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a small API for HTTP
//! handlers and the admin CLI.
//!
//! - [`services::url_service::UrlService`] - Short URL creation, lookup and listing

pub mod services;
