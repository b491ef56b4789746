//! Repository for the `progressions` table.
//!
//! Known viewers have one row per video, kept by an atomic upsert that never
//! lowers the stored fraction. Anonymous views are appended as-is.

use medoh_core::types::DbId;
use sqlx::PgPool;

use crate::models::progression::{HistoryEntry, Progression};

/// Column list for the `progressions` table.
const COLUMNS: &str = "id, viewer_id, video_id, progression, last_viewed, created_at";

/// Provides progression upserts and the "last watched" history.
pub struct ProgressionRepo;

impl ProgressionRepo {
    /// Record a view of `video_id` at `progression` and return the row.
    ///
    /// The fraction must already be validated. For a known viewer the stored
    /// value becomes `max(stored, progression)` and `last_viewed` is bumped.
    pub async fn record_view(
        pool: &PgPool,
        viewer_id: Option<DbId>,
        video_id: DbId,
        progression: f64,
    ) -> Result<Progression, sqlx::Error> {
        let query = match viewer_id {
            Some(_) => format!(
                "INSERT INTO progressions (viewer_id, video_id, progression) \
                 VALUES ($1, $2, $3) \
                 ON CONFLICT (viewer_id, video_id) WHERE viewer_id IS NOT NULL \
                 DO UPDATE SET \
                    progression = GREATEST(progressions.progression, EXCLUDED.progression), \
                    last_viewed = NOW() \
                 RETURNING {COLUMNS}"
            ),
            None => format!(
                "INSERT INTO progressions (viewer_id, video_id, progression) \
                 VALUES ($1, $2, $3) \
                 RETURNING {COLUMNS}"
            ),
        };
        sqlx::query_as::<_, Progression>(&query)
            .bind(viewer_id)
            .bind(video_id)
            .bind(progression)
            .fetch_one(pool)
            .await
    }

    /// Find a viewer's progression record for one video.
    pub async fn find(
        pool: &PgPool,
        viewer_id: DbId,
        video_id: DbId,
    ) -> Result<Option<Progression>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM progressions WHERE viewer_id = $1 AND video_id = $2"
        );
        sqlx::query_as::<_, Progression>(&query)
            .bind(viewer_id)
            .bind(video_id)
            .fetch_optional(pool)
            .await
    }

    /// The viewer's most recently watched videos, newest first.
    pub async fn history(
        pool: &PgPool,
        viewer_id: DbId,
        limit: i64,
    ) -> Result<Vec<HistoryEntry>, sqlx::Error> {
        sqlx::query_as::<_, HistoryEntry>(
            "SELECT v.id AS video_id, v.name, v.thumbnail_url, v.question_id, \
                    p.progression, p.last_viewed \
             FROM progressions p \
             JOIN videos v ON v.id = p.video_id \
             WHERE p.viewer_id = $1 \
             ORDER BY p.last_viewed DESC, p.id DESC \
             LIMIT $2",
        )
        .bind(viewer_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
