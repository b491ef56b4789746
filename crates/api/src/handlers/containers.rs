//! Handlers for `/containers/{kind}/{id}`.
//!
//! `{kind}` is `sections` or `detailed-topic-sections` (the snake_case
//! kind names are accepted too).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use medoh_core::error::CoreError;
use medoh_core::hierarchy::ContainerKey;
use medoh_core::types::DbId;
use medoh_db::models::container::RenameContainer;
use medoh_db::repositories::{ContainerRepo, VideoRepo};
use validator::Validate;

use super::container_key;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::OptionalViewer;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

pub(crate) fn container_not_found(key: ContainerKey) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: key.kind.entity_name(),
        id: key.id,
    })
}

/// PUT /api/v1/containers/{kind}/{id}
pub async fn rename(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
    Json(input): Json<RenameContainer>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let key = container_key(&kind, id)?;
    let container = ContainerRepo::rename(&state.pool, key, &input.name)
        .await?
        .ok_or_else(|| container_not_found(key))?;
    Ok(Json(DataResponse { data: container }))
}

/// DELETE /api/v1/containers/{kind}/{id}
///
/// Memberships are removed with the container; the videos remain.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let key = container_key(&kind, id)?;
    if ContainerRepo::delete(&state.pool, key).await? {
        tracing::info!(container = %key, user_id = admin.user_id, "Container deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(container_not_found(key))
    }
}

/// GET /api/v1/containers/{kind}/{id}/videos
///
/// Ordered members, annotated with the caller's progression when a token is
/// supplied.
pub async fn list_videos(
    viewer: OptionalViewer,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let key = container_key(&kind, id)?;
    ContainerRepo::find(&state.pool, key)
        .await?
        .ok_or_else(|| container_not_found(key))?;
    let members = VideoRepo::list_members(&state.pool, key, viewer.viewer_id()).await?;
    Ok(Json(DataResponse { data: members }))
}
