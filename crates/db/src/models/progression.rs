//! Watch-progress model and DTOs.

use medoh_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `progressions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Progression {
    pub id: DbId,
    /// `None` for anonymous views.
    pub viewer_id: Option<DbId>,
    pub video_id: DbId,
    pub progression: f64,
    pub last_viewed: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for recording a view.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordView {
    pub progression: f64,
}

/// One entry of a viewer's "last watched" list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HistoryEntry {
    pub video_id: DbId,
    pub name: String,
    pub thumbnail_url: Option<String>,
    pub question_id: Option<DbId>,
    pub progression: f64,
    pub last_viewed: Timestamp,
}
