//! Repository for the `topics` table.

use medoh_core::types::DbId;
use sqlx::PgPool;

use crate::models::topic::{CreateTopic, Topic, UpdateTopic};

/// Column list for the `topics` table.
const COLUMNS: &str = "id, name, description, image_url, topic_order, is_detailed, \
    body_part_id, created_at, updated_at";

/// Provides CRUD operations for topics.
pub struct TopicRepo;

impl TopicRepo {
    /// Insert a new topic, appending it after the current last topic when no
    /// `topic_order` is given.
    pub async fn create(pool: &PgPool, input: &CreateTopic) -> Result<Topic, sqlx::Error> {
        let query = format!(
            "INSERT INTO topics (name, description, image_url, topic_order, is_detailed, body_part_id) \
             VALUES ($1, $2, $3, \
                COALESCE($4, (SELECT COALESCE(MAX(topic_order) + 1, 0) FROM topics)), \
                COALESCE($5, false), $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Topic>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.topic_order)
            .bind(input.is_detailed)
            .bind(input.body_part_id)
            .fetch_one(pool)
            .await
    }

    /// Find a topic by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Topic>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM topics WHERE id = $1");
        sqlx::query_as::<_, Topic>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all topics ordered by `(topic_order, id)`.
    pub async fn list(pool: &PgPool) -> Result<Vec<Topic>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM topics ORDER BY topic_order ASC, id ASC");
        sqlx::query_as::<_, Topic>(&query).fetch_all(pool).await
    }

    /// Update a topic. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTopic,
    ) -> Result<Option<Topic>, sqlx::Error> {
        let query = format!(
            "UPDATE topics SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                image_url = COALESCE($4, image_url), \
                topic_order = COALESCE($5, topic_order), \
                body_part_id = COALESCE($6, body_part_id) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Topic>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.topic_order)
            .bind(input.body_part_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a topic and everything beneath it. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM topics WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
