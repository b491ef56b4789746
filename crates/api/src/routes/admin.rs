use axum::routing::put;
use axum::Router;

use crate::handlers::reorder;
use crate::state::AppState;

/// Reorder routes mounted at `/admin`.
///
/// ```text
/// PUT    /topics/{id}/sections/order             -> topic_sections
/// PUT    /detailed-topics/{id}/sections/order    -> detailed_topic_sections
/// PUT    /containers/{kind}/{id}/videos/order    -> container_videos
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/topics/{id}/sections/order", put(reorder::topic_sections))
        .route(
            "/detailed-topics/{id}/sections/order",
            put(reorder::detailed_topic_sections),
        )
        .route(
            "/containers/{kind}/{id}/videos/order",
            put(reorder::container_videos),
        )
}
