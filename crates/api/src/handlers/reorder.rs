//! Handlers for the admin reorder endpoints.
//!
//! Each request carries the complete list of children in their new order.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use medoh_core::error::CoreError;
use medoh_core::hierarchy::ContainerKind;
use medoh_core::types::DbId;
use medoh_db::repositories::{ContainerRepo, ReorderRepo};
use serde::Deserialize;

use super::container_key;
use super::containers::container_not_found;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body: every child id, in the desired order.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<DbId>,
}

async fn reorder_containers(
    state: &AppState,
    kind: ContainerKind,
    parent_id: DbId,
    ids: &[DbId],
) -> AppResult<impl IntoResponse> {
    if !ContainerRepo::parent_exists(&state.pool, kind, parent_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: kind.parent_entity_name(),
            id: parent_id,
        }));
    }
    let plan = ReorderRepo::apply_container_order(&state.pool, kind, parent_id, ids).await?;
    Ok(Json(DataResponse { data: plan }))
}

/// PUT /api/v1/admin/topics/{id}/sections/order
pub async fn topic_sections(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    reorder_containers(&state, ContainerKind::Section, id, &body.ids).await
}

/// PUT /api/v1/admin/detailed-topics/{id}/sections/order
pub async fn detailed_topic_sections(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    reorder_containers(&state, ContainerKind::DetailedTopicSection, id, &body.ids).await
}

/// PUT /api/v1/admin/containers/{kind}/{id}/videos/order
pub async fn container_videos(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
    Json(body): Json<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let key = container_key(&kind, id)?;
    ContainerRepo::find(&state.pool, key)
        .await?
        .ok_or_else(|| container_not_found(key))?;
    let plan = ReorderRepo::apply_member_order(&state.pool, key, &body.ids).await?;
    Ok(Json(DataResponse { data: plan }))
}
