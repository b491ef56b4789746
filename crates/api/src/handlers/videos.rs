//! Handlers for `/videos`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use medoh_core::error::CoreError;
use medoh_core::hierarchy::ContainerKey;
use medoh_core::types::DbId;
use medoh_db::models::video::{CreateVideo, PlaceVideo, Video};
use medoh_db::repositories::VideoRepo;
use validator::Validate;

use super::containers::container_not_found;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

pub(crate) async fn find_video(state: &AppState, id: DbId) -> AppResult<Video> {
    VideoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Video", id }))
}

/// POST /api/v1/videos
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateVideo>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let video = VideoRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: video })))
}

/// GET /api/v1/videos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let video = find_video(&state, id).await?;
    Ok(Json(DataResponse { data: video }))
}

/// PUT /api/v1/videos/{id}/placement
///
/// Moves the video into the target container, leaving any previous
/// container in either schema. Responds with the new location.
pub async fn place(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<PlaceVideo>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    find_video(&state, id).await?;
    let key = ContainerKey {
        kind: input.container_kind,
        id: input.container_id,
    };
    VideoRepo::place(&state.pool, id, key, input.video_order)
        .await?
        .ok_or_else(|| container_not_found(key))?;
    tracing::info!(video_id = id, container = %key, user_id = admin.user_id, "Video placed");

    let location = VideoRepo::locate(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("Video {id} missing after placement")))?;
    Ok(Json(DataResponse { data: location }))
}

/// DELETE /api/v1/videos/{id}/placement
pub async fn unplace(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_video(&state, id).await?;
    VideoRepo::unplace(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/videos/{id}/location
///
/// The "back" link data for the player: container and parent names.
pub async fn location(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_video(&state, id).await?;
    let location = VideoRepo::locate(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VideoPlacement",
            id,
        }))?;
    Ok(Json(DataResponse { data: location }))
}
