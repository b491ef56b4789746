//! Repository for the `detailed_topics` table.

use medoh_core::types::DbId;
use sqlx::PgPool;

use crate::models::detailed_topic::{CreateDetailedTopic, DetailedTopic, UpdateDetailedTopic};

/// Column list for the `detailed_topics` table.
const COLUMNS: &str = "id, topic_id, name, description, image_url, topic_order, is_private, \
    created_at, updated_at";

/// Provides CRUD operations for detailed topics.
pub struct DetailedTopicRepo;

impl DetailedTopicRepo {
    /// Insert a detailed topic under `topic_id`.
    ///
    /// The caller checks that the parent topic is detailed.
    pub async fn create(
        pool: &PgPool,
        topic_id: DbId,
        input: &CreateDetailedTopic,
    ) -> Result<DetailedTopic, sqlx::Error> {
        let query = format!(
            "INSERT INTO detailed_topics (topic_id, name, description, image_url, topic_order, is_private) \
             VALUES ($1, $2, $3, $4, \
                COALESCE($5, (SELECT COALESCE(MAX(topic_order) + 1, 0) FROM detailed_topics WHERE topic_id = $1)), \
                COALESCE($6, false)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DetailedTopic>(&query)
            .bind(topic_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.topic_order)
            .bind(input.is_private)
            .fetch_one(pool)
            .await
    }

    /// Find a detailed topic by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DetailedTopic>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM detailed_topics WHERE id = $1");
        sqlx::query_as::<_, DetailedTopic>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a topic's detailed topics ordered by `(topic_order, id)`.
    ///
    /// Private entries are skipped unless `include_private` is set.
    pub async fn list_by_topic(
        pool: &PgPool,
        topic_id: DbId,
        include_private: bool,
    ) -> Result<Vec<DetailedTopic>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM detailed_topics \
             WHERE topic_id = $1 AND ($2 OR NOT is_private) \
             ORDER BY topic_order ASC, id ASC"
        );
        sqlx::query_as::<_, DetailedTopic>(&query)
            .bind(topic_id)
            .bind(include_private)
            .fetch_all(pool)
            .await
    }

    /// Update a detailed topic. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDetailedTopic,
    ) -> Result<Option<DetailedTopic>, sqlx::Error> {
        let query = format!(
            "UPDATE detailed_topics SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                image_url = COALESCE($4, image_url), \
                topic_order = COALESCE($5, topic_order), \
                is_private = COALESCE($6, is_private) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DetailedTopic>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.topic_order)
            .bind(input.is_private)
            .fetch_optional(pool)
            .await
    }

    /// Delete a detailed topic and its sections. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM detailed_topics WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
