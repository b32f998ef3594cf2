//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one endpoint.

pub mod health;
pub mod not_found;
pub mod recent;
pub mod redirect;
pub mod shorten;

pub use health::health_handler;
pub use not_found::api_not_found_handler;
pub use recent::recent_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
