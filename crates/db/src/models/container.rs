//! Container rows shared by `sections` and `detailed_topic_sections`.
//!
//! Both tables are read through the same column aliases (`parent_id` for the
//! owning topic / detailed topic) so a single row type covers them.

use medoh_core::hierarchy::{Container, ContainerKey, ContainerKind};
use medoh_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from either container table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContainerRow {
    pub id: DbId,
    pub parent_id: DbId,
    pub name: String,
    pub section_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ContainerRow {
    pub fn into_container(self, kind: ContainerKind) -> Container {
        Container {
            key: ContainerKey { kind, id: self.id },
            parent_id: self.parent_id,
            name: self.name,
            order: self.section_order,
        }
    }
}

/// DTO for creating a container.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContainer {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Defaults to one past the parent's current maximum (append).
    #[validate(range(min = 0))]
    pub section_order: Option<i32>,
}

/// DTO for renaming a container. Ordering goes through the reorder endpoints.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RenameContainer {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}
