//! Planning for bulk reorders of containers and container members.
//!
//! A reorder request is the complete list of children in their new order.
//! Anything other than an exact permutation of the current children is
//! rejected, so a stale admin screen cannot silently drop a child out of the
//! order the resolver walks.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// One row's new order value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderAssignment {
    pub id: DbId,
    pub order: i32,
}

/// Validate `requested` against `current` and assign dense orders from 0.
///
/// Dense assignment makes the operation idempotent: applying the same list
/// twice stores the same values.
pub fn plan_reorder(current: &[DbId], requested: &[DbId]) -> Result<Vec<OrderAssignment>, CoreError> {
    let mut seen = BTreeSet::new();
    let duplicates: Vec<DbId> = requested
        .iter()
        .copied()
        .filter(|id| !seen.insert(*id))
        .collect();
    if !duplicates.is_empty() {
        return Err(CoreError::Validation(format!(
            "reorder list contains duplicate ids: {duplicates:?}"
        )));
    }

    let existing: BTreeSet<DbId> = current.iter().copied().collect();
    let unknown: Vec<DbId> = seen.difference(&existing).copied().collect();
    if !unknown.is_empty() {
        return Err(CoreError::Validation(format!(
            "reorder list contains ids that are not children: {unknown:?}"
        )));
    }
    let missing: Vec<DbId> = existing.difference(&seen).copied().collect();
    if !missing.is_empty() {
        return Err(CoreError::Validation(format!(
            "reorder list is missing children: {missing:?}"
        )));
    }

    requested
        .iter()
        .enumerate()
        .map(|(index, &id)| {
            let order = i32::try_from(index).map_err(|_| {
                CoreError::Validation("reorder list is too long".to_string())
            })?;
            Ok(OrderAssignment { id, order })
        })
        .collect()
}
