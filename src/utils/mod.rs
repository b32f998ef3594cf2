//! Utility functions for code generation, URL handling and store errors.
//!
//! - [`code_generator`] - Short code generation and custom alias validation
//! - [`url_validator`] - Target URL validation
//! - [`public_url`] - Public short URL derivation from request headers
//! - [`db_error`] - Backend-specific duplicate key detection

pub mod code_generator;
pub mod db_error;
pub mod public_url;
pub mod url_validator;
