use axum::routing::get;
use axum::Router;

use crate::handlers::{navigation, private_pages};
use crate::state::AppState;

/// Patient-facing routes mounted at `/shared`. Public; the token is the
/// credential.
///
/// ```text
/// GET    /{token}                                   -> shared
/// GET    /{token}/containers/{kind}/{cid}/videos    -> shared_members
/// GET    /{token}/videos/{id}/adjacency             -> shared_adjacency
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{token}", get(private_pages::shared))
        .route(
            "/{token}/containers/{kind}/{cid}/videos",
            get(private_pages::shared_members),
        )
        .route(
            "/{token}/videos/{id}/adjacency",
            get(navigation::shared_adjacency),
        )
}
