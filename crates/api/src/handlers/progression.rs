//! Handlers for recording views and reading the watch history.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use medoh_core::progression::{clamp_history_limit, is_completed, validate_progression};
use medoh_core::types::DbId;
use medoh_db::models::progression::{Progression, RecordView};
use medoh_db::repositories::ProgressionRepo;
use serde::Serialize;

use super::videos::find_video;
use crate::error::AppResult;
use crate::middleware::auth::{AuthUser, OptionalViewer};
use crate::query::HistoryParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// A stored progression plus its completion flag.
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    #[serde(flatten)]
    pub progression: Progression,
    pub completed: bool,
}

/// POST /api/v1/videos/{id}/progress
///
/// Anonymous callers get a fresh record per view; known viewers keep one
/// record whose progression never decreases.
pub async fn record_view(
    viewer: OptionalViewer,
    State(state): State<AppState>,
    Path(video_id): Path<DbId>,
    Json(input): Json<RecordView>,
) -> AppResult<impl IntoResponse> {
    validate_progression(input.progression)?;
    find_video(&state, video_id).await?;

    let viewer_id = viewer.viewer_id();
    let progression =
        ProgressionRepo::record_view(&state.pool, viewer_id, video_id, input.progression).await?;
    tracing::debug!(
        video_id,
        viewer_id = ?viewer_id,
        stored = progression.progression,
        "View recorded"
    );

    let completed = is_completed(progression.progression);
    Ok((
        StatusCode::OK,
        Json(DataResponse {
            data: ProgressResponse {
                progression,
                completed,
            },
        }),
    ))
}

/// GET /api/v1/me/history?limit=
///
/// The caller's last watched videos, newest first.
pub async fn history(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_history_limit(params.limit);
    let entries = ProgressionRepo::history(&state.pool, user.user_id, limit).await?;
    Ok(Json(DataResponse { data: entries }))
}
