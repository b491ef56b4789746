//! Video entity model, membership rows and DTOs.

use medoh_core::hierarchy::{ContainerKey, ContainerKind, VideoRef};
use medoh_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Video {
    pub id: DbId,
    pub name: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    pub duration_secs: Option<i32>,
    pub doctor_id: Option<DbId>,
    pub question_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new video.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVideo {
    #[validate(length(min = 1, max = 300))]
    pub name: String,
    #[validate(url)]
    pub url: String,
    #[validate(url)]
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub duration_secs: Option<i32>,
    pub doctor_id: Option<DbId>,
    pub question_id: Option<DbId>,
}

/// DTO for placing a video into a container.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlaceVideo {
    pub container_kind: ContainerKind,
    pub container_id: DbId,
    /// Defaults to one past the container's current maximum (append).
    #[validate(range(min = 0))]
    pub video_order: Option<i32>,
}

/// A membership row joined with its video and, optionally, the viewer's
/// progression.
#[derive(Debug, Clone, FromRow)]
pub struct MemberRow {
    pub membership_id: DbId,
    pub video_id: DbId,
    pub video_order: i32,
    pub name: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub question_id: Option<DbId>,
    pub doctor_id: Option<DbId>,
    pub progression: Option<f64>,
}

impl MemberRow {
    pub fn into_video_ref(self, container: ContainerKey) -> VideoRef {
        VideoRef {
            video_id: self.video_id,
            container,
            membership_id: self.membership_id,
            video_order: self.video_order,
            name: self.name,
            url: self.url,
            thumbnail_url: self.thumbnail_url,
            question_id: self.question_id,
            doctor_id: self.doctor_id,
            progression: self.progression,
        }
    }
}

/// Where a video lives: the data a player needs for its "back" link.
#[derive(Debug, Clone, Serialize)]
pub struct VideoLocation {
    pub video_id: DbId,
    pub container: ContainerKey,
    pub container_name: String,
    pub section_order: i32,
    pub video_order: i32,
    /// Topic id (plain) or detailed topic id (detailed).
    pub parent_id: DbId,
    pub parent_name: String,
}

/// Raw row for [`VideoLocation`]; the kind is supplied by the query branch.
#[derive(Debug, Clone, FromRow)]
pub struct LocationRow {
    pub container_id: DbId,
    pub container_name: String,
    pub section_order: i32,
    pub video_order: i32,
    pub parent_id: DbId,
    pub parent_name: String,
}

impl LocationRow {
    pub fn into_location(self, video_id: DbId, kind: ContainerKind) -> VideoLocation {
        VideoLocation {
            video_id,
            container: ContainerKey {
                kind,
                id: self.container_id,
            },
            container_name: self.container_name,
            section_order: self.section_order,
            video_order: self.video_order,
            parent_id: self.parent_id,
            parent_name: self.parent_name,
        }
    }
}
