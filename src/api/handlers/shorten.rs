//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::base_url::base_url_from_headers;

/// Creates a short link for a URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// { "shortUrl": "https://sho.rt/aB3-_z", "code": "aB3-_z" }
/// ```
///
/// The short URL uses the configured `BASE_URL`, or the scheme and host the
/// request was addressed to when none is configured.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not JSON or `url` is missing/empty.
/// Returns 500 Internal Server Error if the link could not be stored.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "Invalid JSON body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;
    payload.validate()?;

    let base_url = match &state.base_url {
        Some(base_url) => base_url.to_string(),
        None => base_url_from_headers(&headers)?,
    };

    let link = state
        .link_service
        .shorten(payload.url.as_deref(), &base_url)
        .await?;

    Ok(Json(ShortenResponse {
        short_url: link.short_url,
        code: link.code,
    }))
}
