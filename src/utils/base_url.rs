//! Public base URL resolution from HTTP request headers.

use crate::AppError;
use axum::http::{HeaderMap, header};
use serde_json::json;

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Builds the public base URL (`scheme://host`) a request was addressed to.
///
/// Used when no `BASE_URL` is configured. Honors the reverse-proxy headers:
///
/// - host: `X-Forwarded-Host`, then `Host`
/// - scheme: `X-Forwarded-Proto`, then `http`
///
/// When a forwarded header carries a comma-separated chain, the first
/// (client-facing) entry is used. Ports are kept.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if:
/// - Neither `X-Forwarded-Host` nor `Host` is present
/// - The header value contains invalid UTF-8 or is empty
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "sho.rt:8080".parse().unwrap());
///
/// assert_eq!(base_url_from_headers(&headers).unwrap(), "http://sho.rt:8080");
/// ```
pub fn base_url_from_headers(headers: &HeaderMap) -> Result<String, AppError> {
    let host = first_value(headers, X_FORWARDED_HOST)
        .or_else(|| first_value(headers, header::HOST.as_str()))
        .ok_or_else(|| AppError::bad_request("Missing or invalid Host header", json!({})))?;

    let scheme = first_value(headers, X_FORWARDED_PROTO)
        .map(|s| s.to_ascii_lowercase())
        .filter(|s| s == "http" || s == "https")
        .unwrap_or_else(|| "http".to_string());

    Ok(format!("{scheme}://{host}"))
}

fn first_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let value = headers.get(name)?.to_str().ok()?;
    let first = value.split(',').next()?.trim();
    (!first.is_empty()).then(|| first.to_string())
}

/// Joins a base URL and a short code into a short URL.
pub fn short_url(base: &str, code: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), code)
}
