//! Topic entity model and DTOs.

use medoh_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `topics` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Topic {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub topic_order: i32,
    /// Selects the container shape of every descendant: detailed topics hold
    /// detailed topics, which hold detailed-topic sections.
    pub is_detailed: bool,
    pub body_part_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new topic.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTopic {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Defaults to one past the current maximum.
    pub topic_order: Option<i32>,
    /// Defaults to `false`. Fixed after creation.
    pub is_detailed: Option<bool>,
    pub body_part_id: Option<DbId>,
}

/// DTO for updating a topic. `is_detailed` is deliberately absent.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTopic {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub topic_order: Option<i32>,
    pub body_part_id: Option<DbId>,
}
