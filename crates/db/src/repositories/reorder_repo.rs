//! Bulk reorders of containers within a parent and of members within a
//! container.
//!
//! Each reorder runs in one transaction holding a transaction-scoped advisory
//! lock on the parent, so two admins reordering the same parent are applied
//! one after the other and neither sees a half-written order.

use medoh_core::error::CoreError;
use medoh_core::hierarchy::{ContainerKey, ContainerKind};
use medoh_core::reorder::{plan_reorder, OrderAssignment};
use medoh_core::types::DbId;
use sqlx::PgPool;

use crate::repositories::container_repo::tables;
use crate::repositories::video_repo::lock_key;

/// Failure of a reorder: either the request was not a permutation of the
/// current children, or the store failed.
#[derive(Debug, thiserror::Error)]
pub enum ReorderError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Applies full-list reorders.
pub struct ReorderRepo;

impl ReorderRepo {
    /// Reorder all containers of `kind` under `parent_id` to match
    /// `ordered_ids`. Returns the assigned orders.
    pub async fn apply_container_order(
        pool: &PgPool,
        kind: ContainerKind,
        parent_id: DbId,
        ordered_ids: &[DbId],
    ) -> Result<Vec<OrderAssignment>, ReorderError> {
        let t = tables(kind);
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1, $2)")
            .bind(t.container_lock)
            .bind(lock_key(parent_id))
            .execute(&mut *tx)
            .await?;

        let current_query = format!(
            "SELECT id FROM {table} WHERE {parent} = $1 ORDER BY id FOR UPDATE",
            table = t.container,
            parent = t.parent_column,
        );
        let current: Vec<DbId> = sqlx::query_scalar(&current_query)
            .bind(parent_id)
            .fetch_all(&mut *tx)
            .await?;

        let plan = plan_reorder(&current, ordered_ids)?;

        let update_query = format!(
            "UPDATE {table} AS c SET section_order = n.ord \
             FROM UNNEST($1::BIGINT[], $2::INT[]) AS n(id, ord) \
             WHERE c.id = n.id",
            table = t.container,
        );
        Self::apply_inner(&mut tx, &update_query, &plan).await?;

        tx.commit().await?;
        tracing::info!(%kind, parent_id, count = plan.len(), "Containers reordered");
        Ok(plan)
    }

    /// Reorder the members of `container` to match `ordered_video_ids`.
    /// Returns the assigned orders keyed by video id.
    pub async fn apply_member_order(
        pool: &PgPool,
        container: ContainerKey,
        ordered_video_ids: &[DbId],
    ) -> Result<Vec<OrderAssignment>, ReorderError> {
        let t = tables(container.kind);
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1, $2)")
            .bind(t.member_lock)
            .bind(lock_key(container.id))
            .execute(&mut *tx)
            .await?;

        let current_query = format!(
            "SELECT video_id FROM {} WHERE section_id = $1 ORDER BY video_id FOR UPDATE",
            t.membership,
        );
        let current: Vec<DbId> = sqlx::query_scalar(&current_query)
            .bind(container.id)
            .fetch_all(&mut *tx)
            .await?;

        let plan = plan_reorder(&current, ordered_video_ids)?;

        let update_query = format!(
            "UPDATE {table} AS m SET video_order = n.ord \
             FROM UNNEST($1::BIGINT[], $2::INT[]) AS n(id, ord) \
             WHERE m.video_id = n.id AND m.section_id = $3",
            table = t.membership,
        );
        let ids: Vec<DbId> = plan.iter().map(|a| a.id).collect();
        let orders: Vec<i32> = plan.iter().map(|a| a.order).collect();
        sqlx::query(&update_query)
            .bind(&ids)
            .bind(&orders)
            .bind(container.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(%container, count = plan.len(), "Container members reordered");
        Ok(plan)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn apply_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        update_query: &str,
        plan: &[OrderAssignment],
    ) -> Result<(), sqlx::Error> {
        if plan.is_empty() {
            return Ok(());
        }
        let ids: Vec<DbId> = plan.iter().map(|a| a.id).collect();
        let orders: Vec<i32> = plan.iter().map(|a| a.order).collect();
        sqlx::query(update_query)
            .bind(&ids)
            .bind(&orders)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
