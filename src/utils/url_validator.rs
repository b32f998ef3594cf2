//! Target URL validation.
//!
//! Long URLs are stored exactly as submitted, so this module only checks them;
//! it never rewrites them.

use url::Url;

/// Reasons a long URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that `input` is an absolute `http`/`https` URL with a host.
///
/// Returns the trimmed input on success.
///
/// # Security
///
/// Rejects `javascript:`, `data:`, `file:` and every other non-HTTP scheme,
/// since clients navigate to the stored URL directly.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_long_url(" https://example.com/a ").unwrap(), "https://example.com/a");
/// assert!(validate_long_url("example.com").is_err());
/// assert!(validate_long_url("javascript:alert(1)").is_err());
/// ```
pub fn validate_long_url(input: &str) -> Result<&str, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(trimmed),
        _ => Err(UrlValidationError::MissingHost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_http() {
        assert_eq!(validate_long_url("http://example.com"), Ok("http://example.com"));
    }

    #[test]
    fn test_valid_https_with_path_query_fragment() {
        let url = "https://example.com/a/b?x=1#frag";
        assert_eq!(validate_long_url(url), Ok(url));
    }

    #[test]
    fn test_input_is_not_rewritten() {
        let url = "https://EXAMPLE.COM:443/Path";
        assert_eq!(validate_long_url(url), Ok(url));
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(
            validate_long_url("  https://example.com/a \n"),
            Ok("https://example.com/a")
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(validate_long_url("   "), Err(UrlValidationError::Empty));
    }

    #[test]
    fn test_relative_url_rejected() {
        assert!(matches!(
            validate_long_url("example.com/path"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_not_a_url() {
        assert!(validate_long_url("not-a-url").is_err());
    }

    #[test]
    fn test_javascript_rejected() {
        assert_eq!(
            validate_long_url("javascript:alert(1)"),
            Err(UrlValidationError::UnsupportedProtocol)
        );
    }

    #[test]
    fn test_ftp_rejected() {
        assert_eq!(
            validate_long_url("ftp://example.com/file"),
            Err(UrlValidationError::UnsupportedProtocol)
        );
    }

    #[test]
    fn test_ip_host_accepted() {
        assert!(validate_long_url("http://192.168.1.1:8080/admin").is_ok());
    }
}
