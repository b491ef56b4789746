use axum::routing::{get, put};
use axum::Router;

use crate::handlers::containers;
use crate::state::AppState;

/// Routes mounted at `/containers`.
///
/// ```text
/// PUT    /{kind}/{id}              -> rename
/// DELETE /{kind}/{id}              -> delete
/// GET    /{kind}/{id}/videos       -> list_videos
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{kind}/{id}",
            put(containers::rename).delete(containers::delete),
        )
        .route("/{kind}/{id}/videos", get(containers::list_videos))
}
