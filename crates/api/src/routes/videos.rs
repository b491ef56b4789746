use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{navigation, progression, videos};
use crate::state::AppState;

/// Routes mounted at `/videos`.
///
/// ```text
/// POST   /                         -> create
/// GET    /{id}                     -> get_by_id
/// PUT    /{id}/placement           -> place
/// DELETE /{id}/placement           -> unplace
/// GET    /{id}/location            -> location
/// GET    /{id}/adjacency           -> adjacency
/// POST   /{id}/progress            -> record_view
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(videos::create))
        .route("/{id}", get(videos::get_by_id))
        .route("/{id}/placement", put(videos::place).delete(videos::unplace))
        .route("/{id}/location", get(videos::location))
        .route("/{id}/adjacency", get(navigation::adjacency))
        .route("/{id}/progress", post(progression::record_view))
}
