//! Handlers for the adjacency (previous / next) endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use medoh_core::error::CoreError;
use medoh_core::hierarchy::{ContainerKey, ContainerKind};
use medoh_core::navigation::{Adjacency, AdjacencyRequest, AdjacencyResolver, Outcome, Scope};
use medoh_core::types::DbId;
use uuid::Uuid;

use super::private_pages::{find_page, find_page_by_token};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::OptionalViewer;
use crate::middleware::rbac::ensure_page_owner;
use crate::query::{AdjacencyParams, SharedAdjacencyParams};
use crate::state::AppState;

fn declared_container(
    kind: Option<ContainerKind>,
    id: Option<DbId>,
) -> AppResult<Option<ContainerKey>> {
    match (kind, id) {
        (Some(kind), Some(id)) => Ok(Some(ContainerKey { kind, id })),
        (None, None) => Ok(None),
        _ => Err(AppError::BadRequest(
            "container_kind and container_id must be given together".into(),
        )),
    }
}

/// Run the resolver and map the outcome onto a status: `unavailable` is a
/// 503, `ok` and `empty` are 200. Contract violations are errors.
async fn resolve(
    state: &AppState,
    request: AdjacencyRequest,
) -> AppResult<(StatusCode, Json<Outcome<Adjacency>>)> {
    let resolver = AdjacencyResolver::new(state.hierarchy());
    let outcome = Outcome::from_result(resolver.resolve(&request).await)?;

    let status = match outcome {
        Outcome::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        Outcome::Ok(_) | Outcome::Empty => StatusCode::OK,
    };
    Ok((status, Json(outcome)))
}

/// GET /api/v1/videos/{id}/adjacency?container_kind=&container_id=&private_page_id=
///
/// Answers with an [`Outcome`]: `ok` with the adjacency bundle, `empty` when
/// there is nothing to navigate, or `unavailable` (503) when the store
/// failed. Navigating by `private_page_id` is limited to the page's doctor
/// and admins; patients use [`shared_adjacency`].
pub async fn adjacency(
    viewer: OptionalViewer,
    State(state): State<AppState>,
    Path(video_id): Path<DbId>,
    Query(params): Query<AdjacencyParams>,
) -> AppResult<impl IntoResponse> {
    let container = declared_container(params.container_kind, params.container_id)?;

    let scope = match params.private_page_id {
        None => Scope::Canonical,
        Some(private_page_id) => {
            let user = viewer.0.as_ref().ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Private page navigation requires authentication".into(),
                ))
            })?;
            let page = find_page(&state, private_page_id).await?;
            ensure_page_owner(user, page.doctor_id)?;
            Scope::PrivatePage(private_page_id)
        }
    };

    let request = AdjacencyRequest {
        video_id,
        container,
        viewer_id: viewer.viewer_id(),
        scope,
    };
    resolve(&state, request).await
}

/// GET /api/v1/shared/{token}/videos/{id}/adjacency?container_kind=&container_id=
///
/// Adjacency inside the page behind a share link.
pub async fn shared_adjacency(
    viewer: OptionalViewer,
    State(state): State<AppState>,
    Path((token, video_id)): Path<(Uuid, DbId)>,
    Query(params): Query<SharedAdjacencyParams>,
) -> AppResult<impl IntoResponse> {
    let container = declared_container(params.container_kind, params.container_id)?;
    let page = find_page_by_token(&state, token).await?;

    let request = AdjacencyRequest {
        video_id,
        container,
        viewer_id: viewer.viewer_id(),
        scope: Scope::PrivatePage(page.id),
    };
    resolve(&state, request).await
}
