//! Shared query parameter types for API handlers.

use medoh_core::hierarchy::ContainerKind;
use medoh_core::types::DbId;
use serde::Deserialize;

/// `?limit=` for the watch history. Clamped by
/// [`medoh_core::progression::clamp_history_limit`].
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
}

/// Query parameters for the adjacency endpoint.
///
/// `container_kind` and `container_id` go together; when both are absent the
/// video's own container is used. `private_page_id` narrows navigation to a
/// page's curated set and is only honoured for the owning doctor or an admin.
#[derive(Debug, Deserialize)]
pub struct AdjacencyParams {
    pub container_kind: Option<ContainerKind>,
    pub container_id: Option<DbId>,
    pub private_page_id: Option<DbId>,
}

/// Query parameters for adjacency behind a patient's share link. The scope
/// comes from the link itself.
#[derive(Debug, Deserialize)]
pub struct SharedAdjacencyParams {
    pub container_kind: Option<ContainerKind>,
    pub container_id: Option<DbId>,
}

/// Query parameters for listings that hide private rows by default.
#[derive(Debug, Deserialize)]
pub struct IncludePrivateParams {
    #[serde(default)]
    pub include_private: bool,
}
