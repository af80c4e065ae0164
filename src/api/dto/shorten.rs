//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a URL.
///
/// `url` is optional at the serde level so that a missing field surfaces as
/// a validation error rather than a deserialization rejection.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten. Any non-empty text is accepted.
    #[validate(
        required(message = "URL is required"),
        length(min = 1, message = "URL is required")
    )]
    #[serde(default)]
    pub url: Option<String>,
}

/// Response for a created short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_url: String,
    pub code: String,
}
