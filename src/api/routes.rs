//! API route configuration.

use crate::api::handlers::{list_handler, shorten_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// JSON API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`       - Create a short link
/// - `GET  /stats/{code}`  - Click statistics for one link
/// - `GET  /list`          - Recent links (paginated)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/stats/{code}", get(stats_handler))
        .route("/list", get(list_handler))
}
