//! Handlers for `/topics` and `/detailed-topics` and their containers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use medoh_core::error::CoreError;
use medoh_core::hierarchy::ContainerKind;
use medoh_core::roles::ROLE_ADMIN;
use medoh_core::types::DbId;
use medoh_db::models::container::CreateContainer;
use medoh_db::models::detailed_topic::{CreateDetailedTopic, DetailedTopic, UpdateDetailedTopic};
use medoh_db::models::topic::{CreateTopic, Topic, UpdateTopic};
use medoh_db::repositories::{ContainerRepo, DetailedTopicRepo, TopicRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::OptionalViewer;
use crate::middleware::rbac::RequireAdmin;
use crate::query::IncludePrivateParams;
use crate::response::DataResponse;
use crate::state::AppState;

async fn find_topic(state: &AppState, id: DbId) -> AppResult<Topic> {
    TopicRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Topic", id }))
}

async fn find_detailed_topic(state: &AppState, id: DbId) -> AppResult<DetailedTopic> {
    DetailedTopicRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DetailedTopic",
            id,
        }))
}

// ---------------------------------------------------------------------------
// Topics
// ---------------------------------------------------------------------------

/// GET /api/v1/topics
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let topics = TopicRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: topics }))
}

/// POST /api/v1/topics
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateTopic>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let topic = TopicRepo::create(&state.pool, &input).await?;
    tracing::info!(topic_id = topic.id, user_id = admin.user_id, "Topic created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: topic })))
}

/// GET /api/v1/topics/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let topic = find_topic(&state, id).await?;
    Ok(Json(DataResponse { data: topic }))
}

/// PUT /api/v1/topics/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTopic>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let topic = TopicRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Topic", id }))?;
    Ok(Json(DataResponse { data: topic }))
}

/// DELETE /api/v1/topics/{id}
///
/// Cascades to sections, detailed topics and their memberships.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TopicRepo::delete(&state.pool, id).await? {
        tracing::info!(topic_id = id, user_id = admin.user_id, "Topic deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Topic", id }))
    }
}

// ---------------------------------------------------------------------------
// Plain sections
// ---------------------------------------------------------------------------

/// GET /api/v1/topics/{id}/sections
pub async fn list_sections(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_topic(&state, id).await?;
    let sections = ContainerRepo::list_by_parent(&state.pool, ContainerKind::Section, id).await?;
    Ok(Json(DataResponse { data: sections }))
}

/// POST /api/v1/topics/{id}/sections
///
/// Only non-detailed topics hold plain sections.
pub async fn create_section(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateContainer>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let topic = find_topic(&state, id).await?;
    if topic.is_detailed {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Topic {id} is detailed; add sections to one of its detailed topics"
        ))));
    }
    let section = ContainerRepo::create(&state.pool, ContainerKind::Section, id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: section })))
}

// ---------------------------------------------------------------------------
// Detailed topics
// ---------------------------------------------------------------------------

/// GET /api/v1/topics/{id}/detailed-topics?include_private=false
///
/// Private detailed topics are listed for admins only.
pub async fn list_detailed_topics(
    viewer: OptionalViewer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<IncludePrivateParams>,
) -> AppResult<impl IntoResponse> {
    find_topic(&state, id).await?;
    let is_admin = viewer.0.as_ref().is_some_and(|u| u.role == ROLE_ADMIN);
    let include_private = params.include_private && is_admin;
    let detailed = DetailedTopicRepo::list_by_topic(&state.pool, id, include_private).await?;
    Ok(Json(DataResponse { data: detailed }))
}

/// POST /api/v1/topics/{id}/detailed-topics
pub async fn create_detailed_topic(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateDetailedTopic>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let topic = find_topic(&state, id).await?;
    if !topic.is_detailed {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Topic {id} is not detailed; it holds plain sections"
        ))));
    }
    let detailed = DetailedTopicRepo::create(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detailed })))
}

/// GET /api/v1/detailed-topics/{id}
///
/// A private detailed topic reads as missing for anyone but an admin.
pub async fn get_detailed_topic(
    viewer: OptionalViewer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detailed = find_detailed_topic(&state, id).await?;
    let is_admin = viewer.0.as_ref().is_some_and(|u| u.role == ROLE_ADMIN);
    if detailed.is_private && !is_admin {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "DetailedTopic",
            id,
        }));
    }
    Ok(Json(DataResponse { data: detailed }))
}

/// PUT /api/v1/detailed-topics/{id}
pub async fn update_detailed_topic(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDetailedTopic>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let detailed = DetailedTopicRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DetailedTopic",
            id,
        }))?;
    Ok(Json(DataResponse { data: detailed }))
}

/// GET /api/v1/detailed-topics/{id}/sections
pub async fn list_detailed_sections(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_detailed_topic(&state, id).await?;
    let sections =
        ContainerRepo::list_by_parent(&state.pool, ContainerKind::DetailedTopicSection, id).await?;
    Ok(Json(DataResponse { data: sections }))
}

/// POST /api/v1/detailed-topics/{id}/sections
pub async fn create_detailed_section(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateContainer>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    find_detailed_topic(&state, id).await?;
    let section =
        ContainerRepo::create(&state.pool, ContainerKind::DetailedTopicSection, id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: section })))
}

/// DELETE /api/v1/detailed-topics/{id}
pub async fn delete_detailed_topic(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if DetailedTopicRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "DetailedTopic",
            id,
        }))
    }
}
