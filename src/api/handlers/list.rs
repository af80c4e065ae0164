//! Handler for recent links listing.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::link::LinkResponse;
use crate::api::dto::pagination::ListQueryParams;
use crate::error::AppError;
use crate::state::AppState;

/// Lists links, most recently created first.
///
/// # Endpoint
///
/// `GET /api/list`
///
/// # Query Parameters
///
/// - `limit` (optional): Page size (default: 50, capped at `LIST_MAX_LIMIT`)
/// - `offset` (optional): Links to skip (default: 0)
///
/// # Response
///
/// A JSON array of links shaped like the stats response.
pub async fn list_handler(
    State(state): State<AppState>,
    Query(params): Query<ListQueryParams>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state
        .link_service
        .list(params.limit, params.offset)
        .await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}
