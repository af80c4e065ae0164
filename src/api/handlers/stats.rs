//! Handler for single link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::link::LinkResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the stored link and its click count.
///
/// # Endpoint
///
/// `GET /api/stats/{code}`
///
/// # Response
///
/// ```json
/// {
///   "code": "aB3-_z",
///   "originalUrl": "https://example.com",
///   "clicks": 42,
///   "createdAt": "2025-03-01T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.stats(&code).await?;

    Ok(Json(link.into()))
}
