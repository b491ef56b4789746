pub mod containers;
pub mod navigation;
pub mod private_pages;
pub mod progression;
pub mod reorder;
pub mod topics;
pub mod videos;

use medoh_core::hierarchy::{ContainerKey, ContainerKind};
use medoh_core::types::DbId;

use crate::error::{AppError, AppResult};

/// Parse the `{kind}` path segment of `/containers/{kind}/{id}` routes.
pub(crate) fn container_key(kind: &str, id: DbId) -> AppResult<ContainerKey> {
    let kind: ContainerKind = kind.parse().map_err(AppError::BadRequest)?;
    Ok(ContainerKey { kind, id })
}
