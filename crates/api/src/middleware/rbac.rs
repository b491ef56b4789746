//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the minimum requirement.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use medoh_core::error::CoreError;
use medoh_core::roles::{ROLE_ADMIN, ROLE_DOCTOR};
use medoh_core::types::DbId;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `doctor` or `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireDoctor(pub AuthUser);

impl RequireDoctor {
    /// Doctors may only act on their own pages; admins on any.
    pub fn ensure_owner(&self, doctor_id: DbId) -> Result<(), AppError> {
        ensure_page_owner(&self.0, doctor_id)
    }
}

/// Allow admins, and the doctor a private page belongs to.
pub fn ensure_page_owner(user: &AuthUser, doctor_id: DbId) -> Result<(), AppError> {
    let is_owner = user.role == ROLE_DOCTOR && user.user_id == doctor_id;
    if user.role == ROLE_ADMIN || is_owner {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Private page belongs to another doctor".into(),
        )))
    }
}

impl FromRequestParts<AppState> for RequireDoctor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN && user.role != ROLE_DOCTOR {
            return Err(AppError::Core(CoreError::Forbidden(
                "Doctor or Admin role required".into(),
            )));
        }
        Ok(RequireDoctor(user))
    }
}
