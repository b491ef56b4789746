use axum::routing::get;
use axum::Router;

use crate::handlers::topics;
use crate::state::AppState;

/// Routes mounted at `/topics`.
///
/// ```text
/// GET    /                         -> list
/// POST   /                         -> create
/// GET    /{id}                     -> get_by_id
/// PUT    /{id}                     -> update
/// DELETE /{id}                     -> delete
/// GET    /{id}/sections            -> list_sections
/// POST   /{id}/sections            -> create_section
/// GET    /{id}/detailed-topics     -> list_detailed_topics
/// POST   /{id}/detailed-topics     -> create_detailed_topic
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(topics::list).post(topics::create))
        .route(
            "/{id}",
            get(topics::get_by_id)
                .put(topics::update)
                .delete(topics::delete),
        )
        .route(
            "/{id}/sections",
            get(topics::list_sections).post(topics::create_section),
        )
        .route(
            "/{id}/detailed-topics",
            get(topics::list_detailed_topics).post(topics::create_detailed_topic),
        )
}

/// Routes mounted at `/detailed-topics`.
///
/// ```text
/// GET    /{id}                     -> get_detailed_topic
/// PUT    /{id}                     -> update_detailed_topic
/// DELETE /{id}                     -> delete_detailed_topic
/// GET    /{id}/sections            -> list_detailed_sections
/// POST   /{id}/sections            -> create_detailed_section
/// ```
pub fn detailed_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(topics::get_detailed_topic)
                .put(topics::update_detailed_topic)
                .delete(topics::delete_detailed_topic),
        )
        .route(
            "/{id}/sections",
            get(topics::list_detailed_sections).post(topics::create_detailed_section),
        )
}
