//! Short code generation and custom alias validation.
//!
//! Generated codes are drawn from the 64-character URL-safe alphabet and carry
//! no uniqueness guarantee; the store's unique constraint is what detects a
//! collision.

use crate::error::AppError;
use rand::Rng;
use serde_json::json;

/// Length of generated short codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// URL-safe alphabet: `A-Z`, `a-z`, `0-9`, `-`, `_`.
pub const ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

pub const ALIAS_MIN_LENGTH: usize = 3;
pub const ALIAS_MAX_LENGTH: usize = 20;

/// Aliases that would shadow server routes.
const RESERVED_ALIASES: &[&str] = &["api", "health", "static", "assets"];

/// Generates a random short code of `length` characters.
///
/// Each character is sampled uniformly from [`ALPHABET`] using the
/// thread-local CSPRNG.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(DEFAULT_CODE_LENGTH);
/// assert_eq!(code.len(), 6);
/// assert!(is_url_safe(&code));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Returns true if every character of `code` belongs to [`ALPHABET`].
pub fn is_url_safe(code: &str) -> bool {
    code.bytes().all(|b| ALPHABET.contains(&b))
}

/// Validates a user-provided custom alias.
///
/// # Rules
///
/// - Length: 3-20 characters
/// - Allowed characters: letters, digits, `-` and `_`
/// - Cannot be a reserved route name (case-insensitive)
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_custom_alias("my-link").is_ok());
/// assert!(validate_custom_alias("ab").is_err());       // Too short
/// assert!(validate_custom_alias("my link").is_err());  // Space
/// assert!(validate_custom_alias("API").is_err());      // Reserved
/// ```
pub fn validate_custom_alias(alias: &str) -> Result<(), AppError> {
    let len = alias.chars().count();
    if !(ALIAS_MIN_LENGTH..=ALIAS_MAX_LENGTH).contains(&len) {
        return Err(AppError::bad_request(
            format!(
                "Custom alias must be {}-{} characters",
                ALIAS_MIN_LENGTH, ALIAS_MAX_LENGTH
            ),
            json!({ "provided_length": len }),
        ));
    }

    if !is_url_safe(alias) {
        return Err(AppError::bad_request(
            "Custom alias can only contain letters, digits, hyphens and underscores",
            json!({ "customAlias": alias }),
        ));
    }

    if RESERVED_ALIASES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(alias))
    {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "customAlias": alias }),
        ));
    }

    Ok(())
}
