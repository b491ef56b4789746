//! Normalized view over the two container schemas.
//!
//! Plain topics group videos into `sections`; detailed topics group them into
//! `detailed_topic_sections` underneath an intermediate detailed topic. The two
//! are stored independently, but from the navigation point of view they are
//! the same thing: an ordered list of containers under one parent, each
//! holding an ordered list of videos. [`ContainerKind`] is the only place the
//! distinction survives, and only the storage implementation of
//! [`HierarchyAccessor`] looks at it.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::navigation::NavigationError;
use crate::ordering::{self, Direction, OrderedContainer};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Container identity
// ---------------------------------------------------------------------------

/// Which of the two parallel schemas a container lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// A `sections` row; its parent is a topic.
    Section,
    /// A `detailed_topic_sections` row; its parent is a detailed topic.
    DetailedTopicSection,
}

impl ContainerKind {
    pub const ALL: [ContainerKind; 2] = [ContainerKind::Section, ContainerKind::DetailedTopicSection];

    pub fn as_str(self) -> &'static str {
        match self {
            ContainerKind::Section => "section",
            ContainerKind::DetailedTopicSection => "detailed_topic_section",
        }
    }

    /// Entity name used in not-found errors.
    pub fn entity_name(self) -> &'static str {
        match self {
            ContainerKind::Section => "Section",
            ContainerKind::DetailedTopicSection => "DetailedTopicSection",
        }
    }

    /// Entity name of the parent level.
    pub fn parent_entity_name(self) -> &'static str {
        match self {
            ContainerKind::Section => "Topic",
            ContainerKind::DetailedTopicSection => "DetailedTopic",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContainerKind {
    type Err = String;

    /// Accepts the snake_case name and the kebab-case form used in URLs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "section" | "sections" => Ok(ContainerKind::Section),
            "detailed_topic_section"
            | "detailed-topic-section"
            | "detailed-topic-sections" => Ok(ContainerKind::DetailedTopicSection),
            other => Err(format!(
                "Unknown container kind '{other}'. Must be one of: section, detailed-topic-section"
            )),
        }
    }
}

/// A container id qualified by its schema. Ids are only unique per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContainerKey {
    pub kind: ContainerKind,
    pub id: DbId,
}

impl ContainerKey {
    pub fn section(id: DbId) -> Self {
        Self {
            kind: ContainerKind::Section,
            id,
        }
    }

    pub fn detailed(id: DbId) -> Self {
        Self {
            kind: ContainerKind::DetailedTopicSection,
            id,
        }
    }
}

impl fmt::Display for ContainerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

// ---------------------------------------------------------------------------
// Normalized rows
// ---------------------------------------------------------------------------

/// A section or detailed-topic section, whichever schema it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Container {
    pub key: ContainerKey,
    /// Topic id for plain sections, detailed topic id for detailed sections.
    pub parent_id: DbId,
    pub name: String,
    pub order: i32,
}

impl Container {
    pub fn ordered(&self) -> OrderedContainer {
        OrderedContainer {
            id: self.key.id,
            order: self.order,
        }
    }
}

/// One video as seen through its container membership.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoRef {
    pub video_id: DbId,
    pub container: ContainerKey,
    /// Id of the membership row. Breaks ties between equal `video_order`s.
    pub membership_id: DbId,
    pub video_order: i32,
    pub name: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub question_id: Option<DbId>,
    pub doctor_id: Option<DbId>,
    /// The requesting viewer's progression, when a viewer was supplied.
    /// A viewer with no record reads as `Some(0.0)`; anonymous reads as `None`.
    pub progression: Option<f64>,
}

// ---------------------------------------------------------------------------
// Accessor seam
// ---------------------------------------------------------------------------

/// Read-only queries the adjacency resolver needs from the store.
///
/// Missing rows are `Ok(None)` / `Ok(vec![])`; only a failing store call is
/// an `Err`, and it must be [`NavigationError::Store`].
#[async_trait]
pub trait HierarchyAccessor: Send + Sync {
    /// Point lookup of a container.
    async fn container(&self, key: ContainerKey) -> Result<Option<Container>, NavigationError>;

    /// Members of a container in ascending `video_order`, annotated with the
    /// viewer's progression when `viewer_id` is set.
    async fn members(
        &self,
        key: ContainerKey,
        viewer_id: Option<DbId>,
    ) -> Result<Vec<VideoRef>, NavigationError>;

    /// All containers of one kind under one parent.
    async fn containers_in_parent(
        &self,
        kind: ContainerKind,
        parent_id: DbId,
    ) -> Result<Vec<Container>, NavigationError>;

    /// The container currently holding a video, if it is placed anywhere.
    async fn locate_video(&self, video_id: DbId) -> Result<Option<ContainerKey>, NavigationError>;

    /// The curated video set of a private page, or `None` if the page does
    /// not exist.
    async fn private_page_videos(
        &self,
        private_page_id: DbId,
    ) -> Result<Option<BTreeSet<DbId>>, NavigationError>;

    /// The nearest sibling of `current` in `direction`, or `None` at the edge
    /// of the parent.
    async fn sibling_container(
        &self,
        current: &Container,
        direction: Direction,
    ) -> Result<Option<Container>, NavigationError> {
        let siblings = self
            .containers_in_parent(current.key.kind, current.parent_id)
            .await?;
        let ordered: Vec<OrderedContainer> = siblings.iter().map(Container::ordered).collect();
        let Some(neighbor_id) = ordering::find_neighbor(&ordered, current.ordered(), direction)
        else {
            return Ok(None);
        };
        Ok(siblings.into_iter().find(|c| c.key.id == neighbor_id))
    }
}
