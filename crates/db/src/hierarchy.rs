//! PostgreSQL-backed [`HierarchyAccessor`].

use std::collections::BTreeSet;

use async_trait::async_trait;
use medoh_core::hierarchy::{Container, ContainerKey, ContainerKind, HierarchyAccessor, VideoRef};
use medoh_core::navigation::NavigationError;
use medoh_core::types::DbId;

use crate::repositories::{ContainerRepo, PrivatePageRepo, VideoRepo};
use crate::DbPool;

/// Reads the content hierarchy through the repositories.
#[derive(Clone)]
pub struct PgHierarchy {
    pool: DbPool,
}

impl PgHierarchy {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn store_error(err: sqlx::Error) -> NavigationError {
    tracing::error!(error = %err, "Hierarchy query failed");
    NavigationError::Store(err.to_string())
}

#[async_trait]
impl HierarchyAccessor for PgHierarchy {
    async fn container(&self, key: ContainerKey) -> Result<Option<Container>, NavigationError> {
        ContainerRepo::find(&self.pool, key)
            .await
            .map_err(store_error)
    }

    async fn members(
        &self,
        key: ContainerKey,
        viewer_id: Option<DbId>,
    ) -> Result<Vec<VideoRef>, NavigationError> {
        VideoRepo::list_members(&self.pool, key, viewer_id)
            .await
            .map_err(store_error)
    }

    async fn containers_in_parent(
        &self,
        kind: ContainerKind,
        parent_id: DbId,
    ) -> Result<Vec<Container>, NavigationError> {
        ContainerRepo::list_by_parent(&self.pool, kind, parent_id)
            .await
            .map_err(store_error)
    }

    async fn locate_video(&self, video_id: DbId) -> Result<Option<ContainerKey>, NavigationError> {
        let location = VideoRepo::locate(&self.pool, video_id)
            .await
            .map_err(store_error)?;
        Ok(location.map(|l| l.container))
    }

    async fn private_page_videos(
        &self,
        private_page_id: DbId,
    ) -> Result<Option<BTreeSet<DbId>>, NavigationError> {
        let page = PrivatePageRepo::find_by_id(&self.pool, private_page_id)
            .await
            .map_err(store_error)?;
        if page.is_none() {
            return Ok(None);
        }
        let ids = PrivatePageRepo::list_video_ids(&self.pool, private_page_id)
            .await
            .map_err(store_error)?;
        Ok(Some(ids.into_iter().collect()))
    }
}
