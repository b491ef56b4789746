//! Repository for `private_pages`, `private_videos` and `private_documents`.

use medoh_core::types::DbId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::private_page::{NewPrivateDocument, PrivateDocument, PrivatePage};
use crate::models::video::Video;

/// Column list for the `private_pages` table.
const COLUMNS: &str =
    "id, doctor_id, patient_name, patient_phone, patient_email, url_token, created_at";

/// Column list for the `private_documents` table.
const DOCUMENT_COLUMNS: &str = "id, private_page_id, file_url, file_name, file_type, \
    document_type, uploaded_by, created_at";

/// Validated input for [`PrivatePageRepo::create`].
#[derive(Debug, Clone)]
pub struct NewPrivatePage<'a> {
    pub doctor_id: DbId,
    pub patient_name: &'a str,
    pub patient_phone: &'a str,
    pub patient_email: &'a str,
    pub url_token: Uuid,
    /// Already de-duplicated.
    pub video_ids: &'a [DbId],
    /// Documents with their file type resolved.
    pub documents: &'a [(NewPrivateDocument, String)],
    pub uploaded_by: Option<DbId>,
}

/// Provides private page CRUD and curated-set maintenance.
pub struct PrivatePageRepo;

impl PrivatePageRepo {
    /// Insert a page with its curated videos and documents in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &NewPrivatePage<'_>,
    ) -> Result<PrivatePage, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO private_pages \
                (doctor_id, patient_name, patient_phone, patient_email, url_token) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let page = sqlx::query_as::<_, PrivatePage>(&insert_query)
            .bind(input.doctor_id)
            .bind(input.patient_name)
            .bind(input.patient_phone)
            .bind(input.patient_email)
            .bind(input.url_token)
            .fetch_one(&mut *tx)
            .await?;

        Self::set_videos_inner(&mut tx, page.id, input.video_ids).await?;

        for (doc, file_type) in input.documents {
            sqlx::query(
                "INSERT INTO private_documents \
                    (private_page_id, file_url, file_name, file_type, document_type, uploaded_by) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(page.id)
            .bind(&doc.file_url)
            .bind(&doc.file_name)
            .bind(file_type)
            .bind(&doc.document_type)
            .bind(input.uploaded_by)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(page)
    }

    /// Find a private page by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PrivatePage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM private_pages WHERE id = $1");
        sqlx::query_as::<_, PrivatePage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a private page by the token in its patient-facing link.
    pub async fn find_by_token(
        pool: &PgPool,
        url_token: Uuid,
    ) -> Result<Option<PrivatePage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM private_pages WHERE url_token = $1");
        sqlx::query_as::<_, PrivatePage>(&query)
            .bind(url_token)
            .fetch_optional(pool)
            .await
    }

    /// List a doctor's pages, newest first.
    pub async fn list_by_doctor(
        pool: &PgPool,
        doctor_id: DbId,
    ) -> Result<Vec<PrivatePage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM private_pages \
             WHERE doctor_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, PrivatePage>(&query)
            .bind(doctor_id)
            .fetch_all(pool)
            .await
    }

    /// Replace a page's curated video set. Returns `false` if the page does
    /// not exist.
    pub async fn replace_videos(
        pool: &PgPool,
        private_page_id: DbId,
        video_ids: &[DbId],
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Row lock so concurrent replacements apply one after the other.
        let found: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM private_pages WHERE id = $1 FOR UPDATE")
                .bind(private_page_id)
                .fetch_optional(&mut *tx)
                .await?;
        if found.is_none() {
            return Ok(false);
        }

        Self::set_videos_inner(&mut tx, private_page_id, video_ids).await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Curated video ids of a page in ascending order.
    pub async fn list_video_ids(
        pool: &PgPool,
        private_page_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT video_id FROM private_videos WHERE private_page_id = $1 ORDER BY video_id",
        )
        .bind(private_page_id)
        .fetch_all(pool)
        .await
    }

    /// Full video rows of a page's curated set, in curation order.
    pub async fn list_videos(
        pool: &PgPool,
        private_page_id: DbId,
    ) -> Result<Vec<Video>, sqlx::Error> {
        sqlx::query_as::<_, Video>(
            "SELECT v.id, v.name, v.url, v.thumbnail_url, v.description, v.duration_secs, \
                    v.doctor_id, v.question_id, v.created_at, v.updated_at \
             FROM private_videos pv \
             JOIN videos v ON v.id = pv.video_id \
             WHERE pv.private_page_id = $1 \
             ORDER BY pv.id ASC",
        )
        .bind(private_page_id)
        .fetch_all(pool)
        .await
    }

    /// Documents attached to a page in upload order.
    pub async fn list_documents(
        pool: &PgPool,
        private_page_id: DbId,
    ) -> Result<Vec<PrivateDocument>, sqlx::Error> {
        let query = format!(
            "SELECT {DOCUMENT_COLUMNS} FROM private_documents \
             WHERE private_page_id = $1 \
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, PrivateDocument>(&query)
            .bind(private_page_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a page with its curated set and documents. Returns `true` if a
    /// row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM private_pages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Replace curated videos within an existing transaction.
    async fn set_videos_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        private_page_id: DbId,
        video_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM private_videos WHERE private_page_id = $1")
            .bind(private_page_id)
            .execute(&mut **tx)
            .await?;

        if !video_ids.is_empty() {
            sqlx::query(
                "INSERT INTO private_videos (private_page_id, video_id) \
                 SELECT $1, UNNEST($2::BIGINT[])",
            )
            .bind(private_page_id)
            .bind(video_ids)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}
