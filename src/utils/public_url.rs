//! Public short URL derivation from the inbound request.
//!
//! The short URL is never stored. It is rebuilt on every response as
//! `scheme://host/code`, where `scheme` and `host` come from the request the
//! client actually made.

use crate::AppError;
use axum::http::{HeaderMap, HeaderName, Uri, header};
use serde_json::json;

static X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");
static X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");

/// Extracts the `host[:port]` authority the client addressed.
///
/// With `trust_forwarded`, the first `X-Forwarded-Host` entry wins over the
/// `Host` header. The port is kept, so `localhost:3000` stays
/// `localhost:3000`.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if:
/// - No usable host header is present
/// - The header value contains invalid UTF-8
/// - The value contains characters that cannot appear in an authority
pub fn extract_host_from_headers(
    headers: &HeaderMap,
    trust_forwarded: bool,
) -> Result<String, AppError> {
    if trust_forwarded
        && let Some(forwarded) = first_header_value(headers, &X_FORWARDED_HOST)
    {
        return validate_authority(forwarded);
    }

    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?;

    validate_authority(host)
}

/// Determines the scheme the client used.
///
/// Priority:
/// 1. `X-Forwarded-Proto` (only with `trust_forwarded`, only `http`/`https`)
/// 2. The request URI scheme, when the request line carried an absolute URI
/// 3. `http`
pub fn extract_scheme(uri: &Uri, headers: &HeaderMap, trust_forwarded: bool) -> String {
    if trust_forwarded
        && let Some(proto) = first_header_value(headers, &X_FORWARDED_PROTO)
    {
        let proto = proto.to_ascii_lowercase();
        if proto == "http" || proto == "https" {
            return proto;
        }
    }

    uri.scheme_str()
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "http".to_string())
}

/// Builds `scheme://host` for the current request.
///
/// When the request carries no usable host and `fallback_base_url` is
/// configured, the fallback is returned instead.
pub fn base_url_from_request(
    uri: &Uri,
    headers: &HeaderMap,
    trust_forwarded: bool,
    fallback_base_url: Option<&str>,
) -> Result<String, AppError> {
    // HTTP/2 clients send `:authority` instead of `Host`.
    let host = extract_host_from_headers(headers, trust_forwarded).or_else(|err| {
        uri.authority()
            .map(|authority| authority.to_string())
            .ok_or(err)
    });

    match host {
        Ok(host) => {
            let scheme = extract_scheme(uri, headers, trust_forwarded);
            Ok(format!("{scheme}://{host}"))
        }
        Err(err) => match fallback_base_url {
            Some(base) => Ok(base.trim_end_matches('/').to_string()),
            None => Err(err),
        },
    }
}

/// Joins a base URL and a short code.
pub fn short_url(base_url: &str, code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}

fn first_header_value<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn validate_authority(host: &str) -> Result<String, AppError> {
    let host = host.trim();

    let valid = !host.is_empty()
        && !host
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '\\' | '?' | '#' | '@'));

    if !valid {
        return Err(AppError::bad_request(
            "Invalid Host header",
            json!({ "host": host }),
        ));
    }

    Ok(host.to_string())
}
