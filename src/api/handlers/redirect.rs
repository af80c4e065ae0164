//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::location::encode_location;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Each successful call counts exactly one click; the count and the lookup
/// happen in one store operation.
///
/// # Response
///
/// `302 Found` with the original URL in `Location`. Characters that cannot
/// appear in a header (controls, spaces, non-ASCII) are percent-encoded.
///
/// # Errors
///
/// Bodies are plain text, not JSON, since browsers are the usual client:
///
/// - 404 `Link not found` if the code does not exist
/// - 500 `Internal server error (ref: ...)` on store failure
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Response {
    let original_url = match state.link_service.redirect(&code).await {
        Ok(original_url) => original_url,
        Err(err) => return plain_error(err),
    };

    match HeaderValue::try_from(encode_location(&original_url)) {
        Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
        Err(_) => {
            tracing::error!(%code, "Stored target cannot be used as a Location header");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

fn plain_error(err: AppError) -> Response {
    let status = err.status_code();
    let body = match &err {
        AppError::NotFound { .. } => "Link not found".to_string(),
        AppError::Validation { message, .. } | AppError::Conflict { message, .. } => {
            message.clone()
        }
        AppError::Persistence { reference, .. } => {
            format!("Internal server error (ref: {})", reference)
        }
    };

    (status, body).into_response()
}
