use axum::routing::{get, post};
use axum::Router;

use crate::handlers::private_pages;
use crate::state::AppState;

/// Routes mounted at `/private-pages`.
///
/// ```text
/// POST   /                                     -> create
/// GET    /{id}                                 -> get_by_id
/// DELETE /{id}                                 -> delete
/// GET    /{id}/videos                          -> list_video_ids
/// PUT    /{id}/videos                          -> replace_videos
/// GET    /{id}/documents                       -> list_documents
/// GET    /{id}/containers/{kind}/{cid}/videos  -> scoped_members
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(private_pages::create))
        .route(
            "/{id}",
            get(private_pages::get_by_id).delete(private_pages::delete),
        )
        .route(
            "/{id}/videos",
            get(private_pages::list_video_ids).put(private_pages::replace_videos),
        )
        .route("/{id}/documents", get(private_pages::list_documents))
        .route(
            "/{id}/containers/{kind}/{cid}/videos",
            get(private_pages::scoped_members),
        )
}
