//! Repository for the `sections` and `detailed_topic_sections` tables.
//!
//! Both container schemas go through this one repository; [`tables`] maps a
//! [`ContainerKind`] to the table and column names of its schema. The names
//! are compile-time constants, so interpolating them into SQL is safe.

use medoh_core::hierarchy::{Container, ContainerKey, ContainerKind};
use medoh_core::types::DbId;
use sqlx::PgPool;

use crate::models::container::{ContainerRow, CreateContainer};
use crate::repositories::video_repo::lock_key;

/// Table and column names of one container schema.
#[derive(Debug, Clone, Copy)]
pub(crate) struct KindTables {
    /// The container table.
    pub container: &'static str,
    /// Column in the container table referencing the parent.
    pub parent_column: &'static str,
    /// The parent table.
    pub parent: &'static str,
    /// The membership (container -> video) table.
    pub membership: &'static str,
    /// Advisory-lock namespace used when reordering children of one parent.
    pub container_lock: i32,
    /// Advisory-lock namespace used when reordering members of one container.
    pub member_lock: i32,
}

pub(crate) const fn tables(kind: ContainerKind) -> KindTables {
    match kind {
        ContainerKind::Section => KindTables {
            container: "sections",
            parent_column: "topic_id",
            parent: "topics",
            membership: "section_videos",
            container_lock: 1001,
            member_lock: 1002,
        },
        ContainerKind::DetailedTopicSection => KindTables {
            container: "detailed_topic_sections",
            parent_column: "detailed_topic_id",
            parent: "detailed_topics",
            membership: "detailed_topic_section_videos",
            container_lock: 2001,
            member_lock: 2002,
        },
    }
}

fn columns(kind: ContainerKind) -> String {
    let t = tables(kind);
    format!(
        "id, {} AS parent_id, name, section_order, created_at, updated_at",
        t.parent_column
    )
}

/// Provides CRUD operations for containers of either kind.
pub struct ContainerRepo;

impl ContainerRepo {
    /// Insert a container under `parent_id`.
    ///
    /// Without an explicit `section_order` the container is appended after
    /// the parent's current last child. Takes the parent's reorder lock, so
    /// an append never interleaves with a reorder or another append.
    pub async fn create(
        pool: &PgPool,
        kind: ContainerKind,
        parent_id: DbId,
        input: &CreateContainer,
    ) -> Result<Container, sqlx::Error> {
        let t = tables(kind);
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1, $2)")
            .bind(t.container_lock)
            .bind(lock_key(parent_id))
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO {table} ({parent}, name, section_order) \
             VALUES ($1, $2, COALESCE($3, \
                (SELECT COALESCE(MAX(section_order) + 1, 0) FROM {table} WHERE {parent} = $1))) \
             RETURNING {columns}",
            table = t.container,
            parent = t.parent_column,
            columns = columns(kind),
        );
        let row = sqlx::query_as::<_, ContainerRow>(&query)
            .bind(parent_id)
            .bind(&input.name)
            .bind(input.section_order)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row.into_container(kind))
    }

    /// Find a container by its key.
    pub async fn find(pool: &PgPool, key: ContainerKey) -> Result<Option<Container>, sqlx::Error> {
        let query = format!(
            "SELECT {columns} FROM {table} WHERE id = $1",
            columns = columns(key.kind),
            table = tables(key.kind).container,
        );
        let row = sqlx::query_as::<_, ContainerRow>(&query)
            .bind(key.id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|r| r.into_container(key.kind)))
    }

    /// List a parent's containers ordered by `(section_order, id)`.
    pub async fn list_by_parent(
        pool: &PgPool,
        kind: ContainerKind,
        parent_id: DbId,
    ) -> Result<Vec<Container>, sqlx::Error> {
        let t = tables(kind);
        let query = format!(
            "SELECT {columns} FROM {table} \
             WHERE {parent} = $1 \
             ORDER BY section_order ASC, id ASC",
            columns = columns(kind),
            table = t.container,
            parent = t.parent_column,
        );
        let rows = sqlx::query_as::<_, ContainerRow>(&query)
            .bind(parent_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|r| r.into_container(kind)).collect())
    }

    /// Whether the parent row (topic or detailed topic) exists.
    pub async fn parent_exists(
        pool: &PgPool,
        kind: ContainerKind,
        parent_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1)",
            tables(kind).parent
        );
        sqlx::query_scalar(&query)
            .bind(parent_id)
            .fetch_one(pool)
            .await
    }

    /// Rename a container. Returns `None` if it does not exist.
    pub async fn rename(
        pool: &PgPool,
        key: ContainerKey,
        name: &str,
    ) -> Result<Option<Container>, sqlx::Error> {
        let query = format!(
            "UPDATE {table} SET name = $2 WHERE id = $1 RETURNING {columns}",
            table = tables(key.kind).container,
            columns = columns(key.kind),
        );
        let row = sqlx::query_as::<_, ContainerRow>(&query)
            .bind(key.id)
            .bind(name)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|r| r.into_container(key.kind)))
    }

    /// Delete a container and (by cascade) its memberships. Returns `true` if
    /// a row was removed.
    pub async fn delete(pool: &PgPool, key: ContainerKey) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = $1", tables(key.kind).container);
        let result = sqlx::query(&query).bind(key.id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
