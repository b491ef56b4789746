//! Repository for the `videos` table and both membership tables.
//!
//! A video sits in at most one container across the two schemas. Placement
//! removes any existing membership before inserting the new one, inside a
//! single transaction.

use medoh_core::hierarchy::{ContainerKey, ContainerKind, VideoRef};
use medoh_core::types::DbId;
use sqlx::PgPool;

use crate::models::video::{CreateVideo, LocationRow, MemberRow, Video, VideoLocation};
use crate::repositories::container_repo::tables;

/// Column list for the `videos` table.
const COLUMNS: &str = "id, name, url, thumbnail_url, description, duration_secs, doctor_id, \
    question_id, created_at, updated_at";

/// Membership columns joined with the video and the viewer's progression.
///
/// `$2` is the viewer id. An anonymous viewer gets `NULL` progression; a
/// known viewer without a record gets `0`.
const MEMBER_COLUMNS: &str = "m.id AS membership_id, v.id AS video_id, m.video_order, v.name, \
    v.url, v.thumbnail_url, v.question_id, v.doctor_id, \
    CASE WHEN $2::BIGINT IS NULL THEN NULL ELSE COALESCE(p.progression, 0) END AS progression";

/// Provides video CRUD, placement and membership queries.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a new video. It is not placed in any container.
    pub async fn create(pool: &PgPool, input: &CreateVideo) -> Result<Video, sqlx::Error> {
        let query = format!(
            "INSERT INTO videos \
                (name, url, thumbnail_url, description, duration_secs, doctor_id, question_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(&input.name)
            .bind(&input.url)
            .bind(&input.thumbnail_url)
            .bind(&input.description)
            .bind(input.duration_secs)
            .bind(input.doctor_id)
            .bind(input.question_id)
            .fetch_one(pool)
            .await
    }

    /// Find a video by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Return the subset of `ids` that exist, in ascending order.
    pub async fn existing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM videos WHERE id = ANY($1) ORDER BY id")
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Move a video's single membership into `container`.
    ///
    /// Without `video_order` the video is appended after the container's last
    /// member. Returns the new membership id, or `None` if the container does
    /// not exist.
    pub async fn place(
        pool: &PgPool,
        video_id: DbId,
        container: ContainerKey,
        video_order: Option<i32>,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let t = tables(container.kind);
        let mut tx = pool.begin().await?;

        // Same lock the member reorder takes, so appends never race a reorder.
        sqlx::query("SELECT pg_advisory_xact_lock($1, $2)")
            .bind(t.member_lock)
            .bind(lock_key(container.id))
            .execute(&mut *tx)
            .await?;

        let exists_query = format!("SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1)", t.container);
        let exists: bool = sqlx::query_scalar(&exists_query)
            .bind(container.id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Ok(None);
        }

        // The container lock only covers one schema; concurrent placements of
        // the same video into different schemas meet on the video row.
        sqlx::query("SELECT id FROM videos WHERE id = $1 FOR NO KEY UPDATE")
            .bind(video_id)
            .fetch_optional(&mut *tx)
            .await?;

        for kind in ContainerKind::ALL {
            let query = format!("DELETE FROM {} WHERE video_id = $1", tables(kind).membership);
            sqlx::query(&query)
                .bind(video_id)
                .execute(&mut *tx)
                .await?;
        }

        let insert_query = format!(
            "INSERT INTO {membership} (section_id, video_id, video_order) \
             VALUES ($1, $2, COALESCE($3, \
                (SELECT COALESCE(MAX(video_order) + 1, 0) FROM {membership} WHERE section_id = $1))) \
             RETURNING id",
            membership = t.membership,
        );
        let membership_id: DbId = sqlx::query_scalar(&insert_query)
            .bind(container.id)
            .bind(video_id)
            .bind(video_order)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(membership_id))
    }

    /// Remove a video from whichever container holds it. Returns `true` if a
    /// membership was removed.
    pub async fn unplace(pool: &PgPool, video_id: DbId) -> Result<bool, sqlx::Error> {
        let mut removed = 0;
        for kind in ContainerKind::ALL {
            let query = format!("DELETE FROM {} WHERE video_id = $1", tables(kind).membership);
            removed += sqlx::query(&query)
                .bind(video_id)
                .execute(pool)
                .await?
                .rows_affected();
        }
        Ok(removed > 0)
    }

    /// Find where a video is placed: plain sections first, then detailed.
    pub async fn locate(
        pool: &PgPool,
        video_id: DbId,
    ) -> Result<Option<VideoLocation>, sqlx::Error> {
        for kind in ContainerKind::ALL {
            let t = tables(kind);
            let query = format!(
                "SELECT c.id AS container_id, c.name AS container_name, c.section_order, \
                        m.video_order, p.id AS parent_id, p.name AS parent_name \
                 FROM {membership} m \
                 JOIN {container} c ON c.id = m.section_id \
                 JOIN {parent} p ON p.id = c.{parent_column} \
                 WHERE m.video_id = $1",
                membership = t.membership,
                container = t.container,
                parent = t.parent,
                parent_column = t.parent_column,
            );
            let row = sqlx::query_as::<_, LocationRow>(&query)
                .bind(video_id)
                .fetch_optional(pool)
                .await?;
            if let Some(row) = row {
                return Ok(Some(row.into_location(video_id, kind)));
            }
        }
        Ok(None)
    }

    /// Members of a container ordered by `(video_order, membership id)`.
    pub async fn list_members(
        pool: &PgPool,
        container: ContainerKey,
        viewer_id: Option<DbId>,
    ) -> Result<Vec<VideoRef>, sqlx::Error> {
        let query = format!(
            "SELECT {MEMBER_COLUMNS} \
             FROM {membership} m \
             JOIN videos v ON v.id = m.video_id \
             LEFT JOIN progressions p ON p.video_id = v.id AND p.viewer_id = $2 \
             WHERE m.section_id = $1 \
             ORDER BY m.video_order ASC, m.id ASC",
            membership = tables(container.kind).membership,
        );
        let rows = sqlx::query_as::<_, MemberRow>(&query)
            .bind(container.id)
            .bind(viewer_id)
            .fetch_all(pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| r.into_video_ref(container))
            .collect())
    }

    /// Members of a container restricted to a private page's curated set,
    /// in the same order as [`VideoRepo::list_members`].
    pub async fn list_members_in_private_page(
        pool: &PgPool,
        private_page_id: DbId,
        container: ContainerKey,
        viewer_id: Option<DbId>,
    ) -> Result<Vec<VideoRef>, sqlx::Error> {
        let query = format!(
            "SELECT {MEMBER_COLUMNS} \
             FROM {membership} m \
             JOIN videos v ON v.id = m.video_id \
             JOIN private_videos pv ON pv.video_id = v.id AND pv.private_page_id = $3 \
             LEFT JOIN progressions p ON p.video_id = v.id AND p.viewer_id = $2 \
             WHERE m.section_id = $1 \
             ORDER BY m.video_order ASC, m.id ASC",
            membership = tables(container.kind).membership,
        );
        let rows = sqlx::query_as::<_, MemberRow>(&query)
            .bind(container.id)
            .bind(viewer_id)
            .bind(private_page_id)
            .fetch_all(pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| r.into_video_ref(container))
            .collect())
    }
}

/// Advisory locks take two `int4` keys; ids are folded into the second one.
pub(crate) fn lock_key(id: DbId) -> i32 {
    (id % i64::from(i32::MAX)) as i32
}
