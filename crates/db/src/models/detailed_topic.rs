//! Detailed topic entity model and DTOs.

use medoh_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `detailed_topics` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DetailedTopic {
    pub id: DbId,
    pub topic_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub topic_order: i32,
    /// Hidden from public listings; reachable only through private pages.
    pub is_private: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a detailed topic under a detailed parent topic.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDetailedTopic {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub topic_order: Option<i32>,
    pub is_private: Option<bool>,
}

/// DTO for updating a detailed topic. The parent topic cannot change.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateDetailedTopic {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub topic_order: Option<i32>,
    pub is_private: Option<bool>,
}
