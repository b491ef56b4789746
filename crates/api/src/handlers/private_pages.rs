//! Handlers for `/private-pages`, `/doctors/{id}/private-pages` and the
//! patient-facing `/shared/{token}` view.
//!
//! Management endpoints, including navigation by page id, require the owning
//! doctor (or an admin). Patients reach a page only through its `url_token`
//! link, which exposes nothing beyond what the page curates.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use medoh_core::error::CoreError;
use medoh_core::hierarchy::VideoRef;
use medoh_core::private_page::{
    dedup_video_ids, file_type_from_url, normalize_patient_name, normalize_patient_phone,
    placeholder_email,
};
use medoh_core::types::DbId;
use medoh_db::models::private_page::{
    CreatePrivatePage, PrivateDocument, PrivatePage, ReplacePrivateVideos,
};
use medoh_db::models::video::Video;
use medoh_db::repositories::{ContainerRepo, NewPrivatePage, PrivatePageRepo, VideoRepo};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use super::container_key;
use super::containers::container_not_found;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::OptionalViewer;
use crate::middleware::rbac::RequireDoctor;
use crate::response::DataResponse;
use crate::state::AppState;

/// What a patient sees behind the shared link.
#[derive(Debug, Serialize)]
pub struct SharedPage {
    pub private_page_id: DbId,
    pub patient_name: String,
    pub videos: Vec<Video>,
    pub documents: Vec<PrivateDocument>,
}

pub(crate) async fn find_page(state: &AppState, id: DbId) -> AppResult<PrivatePage> {
    PrivatePageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PrivatePage",
            id,
        }))
}

pub(crate) async fn find_page_by_token(state: &AppState, token: Uuid) -> AppResult<PrivatePage> {
    // Unknown tokens read as a plain 404 without echoing the token.
    PrivatePageRepo::find_by_token(&state.pool, token)
        .await?
        .ok_or(AppError::Database(sqlx::Error::RowNotFound))
}

/// A container's members restricted to a page's curated set.
async fn page_members(
    state: &AppState,
    private_page_id: DbId,
    kind: &str,
    container_id: DbId,
    viewer_id: Option<DbId>,
) -> AppResult<Vec<VideoRef>> {
    let key = container_key(kind, container_id)?;
    ContainerRepo::find(&state.pool, key)
        .await?
        .ok_or_else(|| container_not_found(key))?;
    let members =
        VideoRepo::list_members_in_private_page(&state.pool, private_page_id, key, viewer_id)
            .await?;
    Ok(members)
}

/// De-duplicate and check that every id names an existing video.
async fn checked_video_ids(state: &AppState, requested: &[DbId]) -> AppResult<Vec<DbId>> {
    let ids = dedup_video_ids(requested);
    if ids.is_empty() {
        return Ok(ids);
    }
    let existing = VideoRepo::existing_ids(&state.pool, &ids).await?;
    let unknown: Vec<DbId> = ids
        .iter()
        .copied()
        .filter(|id| existing.binary_search(id).is_err())
        .collect();
    if !unknown.is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown video ids: {unknown:?}"
        ))));
    }
    Ok(ids)
}

/// POST /api/v1/private-pages
///
/// Creates the page, its curated set and its document records atomically.
/// The patient gets a fresh link token and a unique placeholder email.
pub async fn create(
    doctor: RequireDoctor,
    State(state): State<AppState>,
    Json(input): Json<CreatePrivatePage>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    doctor.ensure_owner(input.doctor_id)?;

    let patient_name = normalize_patient_name(&input.patient_name)?;
    let patient_phone = normalize_patient_phone(&input.patient_phone)?;
    let video_ids = checked_video_ids(&state, &input.video_ids).await?;
    let documents: Vec<_> = input
        .documents
        .iter()
        .map(|doc| {
            let file_type = doc
                .file_type
                .clone()
                .unwrap_or_else(|| file_type_from_url(&doc.file_url));
            (doc.clone(), file_type)
        })
        .collect();

    let url_token = Uuid::new_v4();
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(8).collect();
    let patient_email = placeholder_email(&patient_phone, &suffix);

    let page = PrivatePageRepo::create(
        &state.pool,
        &NewPrivatePage {
            doctor_id: input.doctor_id,
            patient_name: &patient_name,
            patient_phone: &patient_phone,
            patient_email: &patient_email,
            url_token,
            video_ids: &video_ids,
            documents: &documents,
            uploaded_by: Some(doctor.0.user_id),
        },
    )
    .await?;

    tracing::info!(
        private_page_id = page.id,
        doctor_id = page.doctor_id,
        videos = video_ids.len(),
        documents = documents.len(),
        "Private page created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: page })))
}

/// GET /api/v1/private-pages/{id}
pub async fn get_by_id(
    doctor: RequireDoctor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let page = find_page(&state, id).await?;
    doctor.ensure_owner(page.doctor_id)?;
    Ok(Json(DataResponse { data: page }))
}

/// DELETE /api/v1/private-pages/{id}
pub async fn delete(
    doctor: RequireDoctor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let page = find_page(&state, id).await?;
    doctor.ensure_owner(page.doctor_id)?;
    PrivatePageRepo::delete(&state.pool, id).await?;
    tracing::info!(private_page_id = id, "Private page deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/private-pages/{id}/videos
pub async fn replace_videos(
    doctor: RequireDoctor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReplacePrivateVideos>,
) -> AppResult<impl IntoResponse> {
    let page = find_page(&state, id).await?;
    doctor.ensure_owner(page.doctor_id)?;
    let video_ids = checked_video_ids(&state, &input.video_ids).await?;
    if !PrivatePageRepo::replace_videos(&state.pool, id, &video_ids).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "PrivatePage",
            id,
        }));
    }
    let stored = PrivatePageRepo::list_video_ids(&state.pool, id).await?;
    Ok(Json(DataResponse { data: stored }))
}

/// GET /api/v1/private-pages/{id}/videos
pub async fn list_video_ids(
    doctor: RequireDoctor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let page = find_page(&state, id).await?;
    doctor.ensure_owner(page.doctor_id)?;
    let ids = PrivatePageRepo::list_video_ids(&state.pool, id).await?;
    Ok(Json(DataResponse { data: ids }))
}

/// GET /api/v1/private-pages/{id}/documents
pub async fn list_documents(
    doctor: RequireDoctor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let page = find_page(&state, id).await?;
    doctor.ensure_owner(page.doctor_id)?;
    let documents = PrivatePageRepo::list_documents(&state.pool, id).await?;
    Ok(Json(DataResponse { data: documents }))
}

/// GET /api/v1/private-pages/{id}/containers/{kind}/{cid}/videos
///
/// The owner's view of a container restricted to the page's curated set.
pub async fn scoped_members(
    doctor: RequireDoctor,
    State(state): State<AppState>,
    Path((id, kind, container_id)): Path<(DbId, String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let page = find_page(&state, id).await?;
    doctor.ensure_owner(page.doctor_id)?;
    let members =
        page_members(&state, page.id, &kind, container_id, Some(doctor.0.user_id)).await?;
    Ok(Json(DataResponse { data: members }))
}

/// GET /api/v1/doctors/{id}/private-pages
pub async fn list_by_doctor(
    doctor: RequireDoctor,
    State(state): State<AppState>,
    Path(doctor_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    doctor.ensure_owner(doctor_id)?;
    let pages = PrivatePageRepo::list_by_doctor(&state.pool, doctor_id).await?;
    Ok(Json(DataResponse { data: pages }))
}

/// GET /api/v1/shared/{token}
pub async fn shared(
    State(state): State<AppState>,
    Path(token): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let page = find_page_by_token(&state, token).await?;
    let videos = PrivatePageRepo::list_videos(&state.pool, page.id).await?;
    let documents = PrivatePageRepo::list_documents(&state.pool, page.id).await?;
    Ok(Json(DataResponse {
        data: SharedPage {
            private_page_id: page.id,
            patient_name: page.patient_name,
            videos,
            documents,
        },
    }))
}

/// GET /api/v1/shared/{token}/containers/{kind}/{cid}/videos
///
/// The patient's view of a container: curated members only, in container
/// order.
pub async fn shared_members(
    viewer: OptionalViewer,
    State(state): State<AppState>,
    Path((token, kind, container_id)): Path<(Uuid, String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let page = find_page_by_token(&state, token).await?;
    let members = page_members(&state, page.id, &kind, container_id, viewer.viewer_id()).await?;
    Ok(Json(DataResponse { data: members }))
}
