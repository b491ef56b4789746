//! Order comparator for sibling containers and container members.
//!
//! Order keys are sparse and may collide. Every comparison here uses the
//! pair `(order, id)`, which makes the order total: two siblings that share
//! an order value are ranked by id (creation order for BIGSERIAL keys).

use serde::{Deserialize, Serialize};

use crate::hierarchy::{Container, VideoRef};
use crate::types::DbId;

/// Which neighbor to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Before,
    After,
}

/// The two fields of a container that ordering depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedContainer {
    pub id: DbId,
    pub order: i32,
}

impl OrderedContainer {
    fn rank(&self) -> (i32, DbId) {
        (self.order, self.id)
    }
}

/// Find the nearest container strictly before or after `current`.
///
/// `containers` may include `current` itself and need not be sorted.
/// Returns `None` when `current` is first (`Before`) or last (`After`).
pub fn find_neighbor(
    containers: &[OrderedContainer],
    current: OrderedContainer,
    direction: Direction,
) -> Option<DbId> {
    let here = current.rank();
    let candidates = containers.iter().map(OrderedContainer::rank);
    let found = match direction {
        Direction::After => candidates.filter(|rank| *rank > here).min(),
        Direction::Before => candidates.filter(|rank| *rank < here).max(),
    };
    found.map(|(_, id)| id)
}

/// Sort containers by `(order, id)`.
pub fn sort_containers(containers: &mut [Container]) {
    containers.sort_by_key(|c| (c.order, c.key.id));
}

/// Sort container members by `(video_order, membership_id)`.
pub fn sort_members(members: &mut [VideoRef]) {
    members.sort_by_key(|m| (m.video_order, m.membership_id));
}
