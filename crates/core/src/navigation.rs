//! Previous/next resolution for the video currently being watched.
//!
//! Given a video and the container it is being watched in, the resolver
//! returns the video before it and the videos after it. When the container
//! runs out in either direction it crosses into the nearest sibling container
//! under the same parent (one hop only: an empty sibling ends the search).
//!
//! A private page narrows every step to the page's curated video set,
//! including both boundary crossings.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::hierarchy::{Container, ContainerKey, HierarchyAccessor, VideoRef};
use crate::ordering::{self, Direction};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Errors and outcomes
// ---------------------------------------------------------------------------

/// Why a navigation request did not produce an adjacency bundle.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NavigationError {
    /// The declared container does not exist. Reads as "no content".
    #[error("Container {container} not found")]
    ContainerNotFound { container: ContainerKey },

    /// The video is not placed in any container. Reads as "no content".
    #[error("Video {video_id} is not placed in any container")]
    VideoNotPlaced { video_id: DbId },

    #[error("Private page {private_page_id} not found")]
    PrivatePageNotFound { private_page_id: DbId },

    /// The caller named a container the video does not belong to.
    #[error("Video {video_id} is not a member of {container}")]
    VideoNotInContainer {
        video_id: DbId,
        container: ContainerKey,
    },

    /// The video is outside the curated set of the requested private page.
    #[error("Video {video_id} is not part of private page {private_page_id}")]
    ScopeViolation {
        video_id: DbId,
        private_page_id: DbId,
    },

    /// The backing store call itself failed.
    #[error("Store lookup failed: {0}")]
    Store(String),
}

/// The closed set of outcomes a caller renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Outcome<T> {
    Ok(T),
    /// Legitimately nothing to show.
    Empty,
    /// The store failed; the caller should offer a retry.
    Unavailable,
}

impl<T> Outcome<T> {
    /// Fold a resolver result into an outcome.
    ///
    /// Contract violations (`VideoNotInContainer`, `ScopeViolation`,
    /// `PrivatePageNotFound`) are not outcomes and are returned as errors.
    pub fn from_result(result: Result<T, NavigationError>) -> Result<Self, NavigationError> {
        match result {
            Ok(value) => Ok(Outcome::Ok(value)),
            Err(NavigationError::ContainerNotFound { .. } | NavigationError::VideoNotPlaced { .. }) => {
                Ok(Outcome::Empty)
            }
            Err(NavigationError::Store(msg)) => {
                tracing::warn!(error = %msg, "Navigation store failure");
                Ok(Outcome::Unavailable)
            }
            Err(other) => Err(other),
        }
    }
}

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

/// Which videos a viewer may navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// The full public hierarchy.
    #[default]
    Canonical,
    /// Only the videos curated onto this private page.
    PrivatePage(DbId),
}

#[derive(Debug, Clone)]
pub struct AdjacencyRequest {
    pub video_id: DbId,
    /// Container the video is being watched in. Located from the video when
    /// omitted.
    pub container: Option<ContainerKey>,
    pub viewer_id: Option<DbId>,
    pub scope: Scope,
}

/// Everything the player needs to render previous/next controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjacency {
    pub container: Container,
    pub previous_video: Option<VideoRef>,
    pub next_videos: Vec<VideoRef>,
    /// Set only when `next_videos` came from the following container.
    pub next_container: Option<Container>,
    /// Number of (visible) videos in the current container.
    pub total_in_section: usize,
    /// Zero-based position of the video among those.
    pub current_index: usize,
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Stateless adjacency resolver over any [`HierarchyAccessor`].
pub struct AdjacencyResolver<A> {
    accessor: A,
}

impl<A: HierarchyAccessor> AdjacencyResolver<A> {
    pub fn new(accessor: A) -> Self {
        Self { accessor }
    }

    pub async fn resolve(&self, request: &AdjacencyRequest) -> Result<Adjacency, NavigationError> {
        let video_id = request.video_id;
        let allowed = self.allowed_videos(video_id, request.scope).await?;

        let key = match request.container {
            Some(key) => key,
            None => self
                .accessor
                .locate_video(video_id)
                .await?
                .ok_or(NavigationError::VideoNotPlaced { video_id })?,
        };

        let container = self
            .accessor
            .container(key)
            .await?
            .ok_or(NavigationError::ContainerNotFound { container: key })?;

        let canonical = self.ordered_members(key, request.viewer_id).await?;
        if !canonical.iter().any(|m| m.video_id == video_id) {
            return Err(NavigationError::VideoNotInContainer {
                video_id,
                container: key,
            });
        }
        let members = restrict(canonical, allowed.as_ref());

        // Present in the canonical list and (when scoped) in the allowed set.
        let current_index = members
            .iter()
            .position(|m| m.video_id == video_id)
            .ok_or(NavigationError::VideoNotInContainer {
                video_id,
                container: key,
            })?;
        let total_in_section = members.len();

        let mut previous_video = current_index
            .checked_sub(1)
            .map(|i| members[i].clone());
        let mut next_videos = members[current_index + 1..].to_vec();
        let mut next_container = None;

        if previous_video.is_none() {
            if let Some((sibling, mut videos)) = self
                .crossing(&container, Direction::Before, request.viewer_id, allowed.as_ref())
                .await?
            {
                previous_video = videos.pop();
                tracing::debug!(
                    video_id,
                    from = %key,
                    to = %sibling.key,
                    found = previous_video.is_some(),
                    "Crossed into previous container"
                );
            }
        }

        if next_videos.is_empty() {
            if let Some((sibling, videos)) = self
                .crossing(&container, Direction::After, request.viewer_id, allowed.as_ref())
                .await?
            {
                tracing::debug!(
                    video_id,
                    from = %key,
                    to = %sibling.key,
                    count = videos.len(),
                    "Crossed into next container"
                );
                if !videos.is_empty() {
                    next_videos = videos;
                    next_container = Some(sibling);
                }
            }
        }

        Ok(Adjacency {
            container,
            previous_video,
            next_videos,
            next_container,
            total_in_section,
            current_index,
        })
    }

    /// Resolve the scope into the set of videos the request may see.
    async fn allowed_videos(
        &self,
        video_id: DbId,
        scope: Scope,
    ) -> Result<Option<BTreeSet<DbId>>, NavigationError> {
        let Scope::PrivatePage(private_page_id) = scope else {
            return Ok(None);
        };
        let allowed = self
            .accessor
            .private_page_videos(private_page_id)
            .await?
            .ok_or(NavigationError::PrivatePageNotFound { private_page_id })?;
        if !allowed.contains(&video_id) {
            return Err(NavigationError::ScopeViolation {
                video_id,
                private_page_id,
            });
        }
        Ok(Some(allowed))
    }

    async fn ordered_members(
        &self,
        key: ContainerKey,
        viewer_id: Option<DbId>,
    ) -> Result<Vec<VideoRef>, NavigationError> {
        let mut members = self.accessor.members(key, viewer_id).await?;
        ordering::sort_members(&mut members);
        Ok(members)
    }

    /// The immediate sibling in `direction` and its visible members.
    async fn crossing(
        &self,
        current: &Container,
        direction: Direction,
        viewer_id: Option<DbId>,
        allowed: Option<&BTreeSet<DbId>>,
    ) -> Result<Option<(Container, Vec<VideoRef>)>, NavigationError> {
        let Some(sibling) = self.accessor.sibling_container(current, direction).await? else {
            return Ok(None);
        };
        let members = self.ordered_members(sibling.key, viewer_id).await?;
        Ok(Some((sibling, restrict(members, allowed))))
    }
}

fn restrict(members: Vec<VideoRef>, allowed: Option<&BTreeSet<DbId>>) -> Vec<VideoRef> {
    match allowed {
        None => members,
        Some(set) => members
            .into_iter()
            .filter(|m| set.contains(&m.video_id))
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;
    use crate::hierarchy::ContainerKind;

    /// In-memory hierarchy keyed the same way the database is.
    #[derive(Default)]
    struct MemoryHierarchy {
        containers: Vec<Container>,
        members: Vec<VideoRef>,
        pages: HashMap<DbId, BTreeSet<DbId>>,
        progress: HashMap<(DbId, DbId), f64>,
        failing: bool,
    }

    impl MemoryHierarchy {
        fn with_container(mut self, key: ContainerKey, parent_id: DbId, order: i32) -> Self {
            self.containers.push(Container {
                key,
                parent_id,
                name: format!("{key}"),
                order,
            });
            self
        }

        /// Append videos to a container with orders 0, 1, 2, ...
        fn with_videos(mut self, key: ContainerKey, video_ids: &[DbId]) -> Self {
            for (i, &video_id) in video_ids.iter().enumerate() {
                self.members.push(video(video_id, key, i as i32));
            }
            self
        }

        fn with_page(mut self, page_id: DbId, video_ids: &[DbId]) -> Self {
            self.pages.insert(page_id, video_ids.iter().copied().collect());
            self
        }

        fn check(&self) -> Result<(), NavigationError> {
            if self.failing {
                Err(NavigationError::Store("connection reset".into()))
            } else {
                Ok(())
            }
        }
    }

    fn video(video_id: DbId, container: ContainerKey, video_order: i32) -> VideoRef {
        VideoRef {
            video_id,
            container,
            membership_id: video_id * 10,
            video_order,
            name: format!("video {video_id}"),
            url: format!("https://cdn.example/{video_id}.mp4"),
            thumbnail_url: None,
            question_id: None,
            doctor_id: None,
            progression: None,
        }
    }

    #[async_trait]
    impl HierarchyAccessor for MemoryHierarchy {
        async fn container(&self, key: ContainerKey) -> Result<Option<Container>, NavigationError> {
            self.check()?;
            Ok(self.containers.iter().find(|c| c.key == key).cloned())
        }

        async fn members(
            &self,
            key: ContainerKey,
            viewer_id: Option<DbId>,
        ) -> Result<Vec<VideoRef>, NavigationError> {
            self.check()?;
            // Deliberately reversed: the resolver must not trust store order.
            let mut out: Vec<VideoRef> = self
                .members
                .iter()
                .filter(|m| m.container == key)
                .cloned()
                .map(|mut m| {
                    m.progression = viewer_id
                        .map(|v| self.progress.get(&(v, m.video_id)).copied().unwrap_or(0.0));
                    m
                })
                .collect();
            out.reverse();
            Ok(out)
        }

        async fn containers_in_parent(
            &self,
            kind: ContainerKind,
            parent_id: DbId,
        ) -> Result<Vec<Container>, NavigationError> {
            self.check()?;
            Ok(self
                .containers
                .iter()
                .filter(|c| c.key.kind == kind && c.parent_id == parent_id)
                .cloned()
                .collect())
        }

        async fn locate_video(&self, video_id: DbId) -> Result<Option<ContainerKey>, NavigationError> {
            self.check()?;
            Ok(self
                .members
                .iter()
                .find(|m| m.video_id == video_id)
                .map(|m| m.container))
        }

        async fn private_page_videos(
            &self,
            private_page_id: DbId,
        ) -> Result<Option<BTreeSet<DbId>>, NavigationError> {
            self.check()?;
            Ok(self.pages.get(&private_page_id).cloned())
        }
    }

    const S1: ContainerKey = ContainerKey {
        kind: ContainerKind::Section,
        id: 1,
    };
    const S2: ContainerKey = ContainerKey {
        kind: ContainerKind::Section,
        id: 2,
    };
    const S3: ContainerKey = ContainerKey {
        kind: ContainerKind::Section,
        id: 3,
    };

    /// Topic 100 with sections S1 [11,12,13], S2 [21,22], S3 [31].
    fn topic() -> MemoryHierarchy {
        MemoryHierarchy::default()
            .with_container(S1, 100, 0)
            .with_container(S2, 100, 1)
            .with_container(S3, 100, 2)
            .with_videos(S1, &[11, 12, 13])
            .with_videos(S2, &[21, 22])
            .with_videos(S3, &[31])
    }

    fn request(video_id: DbId, container: ContainerKey) -> AdjacencyRequest {
        AdjacencyRequest {
            video_id,
            container: Some(container),
            viewer_id: None,
            scope: Scope::Canonical,
        }
    }

    fn ids(videos: &[VideoRef]) -> Vec<DbId> {
        videos.iter().map(|v| v.video_id).collect()
    }

    // -- in-container ------------------------------------------------------

    #[tokio::test]
    async fn middle_video_has_both_neighbors_in_container() {
        let resolver = AdjacencyResolver::new(topic());
        let adj = resolver.resolve(&request(12, S1)).await.unwrap();

        assert_eq!(adj.previous_video.map(|v| v.video_id), Some(11));
        assert_eq!(ids(&adj.next_videos), vec![13]);
        assert_eq!(adj.next_container, None);
        assert_eq!(adj.current_index, 1);
        assert_eq!(adj.total_in_section, 3);
    }

    #[tokio::test]
    async fn members_are_ordered_by_video_order_then_membership() {
        let mut hierarchy = topic();
        // Collide video 13's order with video 11's; membership id breaks the tie.
        hierarchy
            .members
            .iter_mut()
            .filter(|m| m.video_id == 13)
            .for_each(|m| m.video_order = 0);
        let resolver = AdjacencyResolver::new(hierarchy);
        let adj = resolver.resolve(&request(11, S1)).await.unwrap();
        assert_eq!(ids(&adj.next_videos), vec![13, 12]);
    }

    // -- boundary crossing -------------------------------------------------

    #[tokio::test]
    async fn last_in_section_crosses_into_next_section() {
        let resolver = AdjacencyResolver::new(topic());
        let adj = resolver.resolve(&request(13, S1)).await.unwrap();

        assert_eq!(ids(&adj.next_videos), vec![21, 22]);
        let next = adj.next_container.expect("next section label");
        assert_eq!(next.key, S2);
        assert_eq!(next.name, "section:2");
        assert_eq!(adj.previous_video.map(|v| v.video_id), Some(12));
    }

    #[tokio::test]
    async fn first_in_section_takes_last_of_previous_section() {
        let resolver = AdjacencyResolver::new(topic());
        let adj = resolver.resolve(&request(21, S2)).await.unwrap();

        assert_eq!(adj.previous_video.map(|v| v.video_id), Some(13));
        assert_eq!(ids(&adj.next_videos), vec![22]);
    }

    #[tokio::test]
    async fn last_in_topic_has_no_next() {
        let resolver = AdjacencyResolver::new(topic());
        let adj = resolver.resolve(&request(31, S3)).await.unwrap();

        assert!(adj.next_videos.is_empty());
        assert_eq!(adj.next_container, None);
        assert_eq!(adj.previous_video.map(|v| v.video_id), Some(22));
    }

    #[tokio::test]
    async fn first_in_topic_has_no_previous() {
        let resolver = AdjacencyResolver::new(topic());
        let adj = resolver.resolve(&request(11, S1)).await.unwrap();
        assert_eq!(adj.previous_video, None);
    }

    #[tokio::test]
    async fn empty_previous_sibling_stops_after_one_hop() {
        // S1 [11], S2 [], S3 [31]: the previous of 31 is not searched past S2.
        let hierarchy = MemoryHierarchy::default()
            .with_container(S1, 100, 0)
            .with_container(S2, 100, 1)
            .with_container(S3, 100, 2)
            .with_videos(S1, &[11])
            .with_videos(S3, &[31]);
        let resolver = AdjacencyResolver::new(hierarchy);
        let adj = resolver.resolve(&request(31, S3)).await.unwrap();
        assert_eq!(adj.previous_video, None);

        let adj = resolver.resolve(&request(11, S1)).await.unwrap();
        assert!(adj.next_videos.is_empty());
        assert_eq!(adj.next_container, None);
    }

    #[tokio::test]
    async fn crossing_respects_sparse_orders() {
        let hierarchy = MemoryHierarchy::default()
            .with_container(S1, 100, 50)
            .with_container(S2, 100, 5)
            .with_container(S3, 100, 500)
            .with_videos(S1, &[11])
            .with_videos(S2, &[21])
            .with_videos(S3, &[31]);
        let resolver = AdjacencyResolver::new(hierarchy);
        let adj = resolver.resolve(&request(11, S1)).await.unwrap();
        assert_eq!(adj.previous_video.map(|v| v.video_id), Some(21));
        assert_eq!(ids(&adj.next_videos), vec![31]);
    }

    #[tokio::test]
    async fn crossing_stays_within_parent_and_kind() {
        let d1 = ContainerKey::detailed(1);
        let d2 = ContainerKey::detailed(2);
        // Detailed sections share parent id 100 and numeric ids with S1/S2.
        let hierarchy = topic()
            .with_container(d1, 100, 0)
            .with_container(d2, 100, 1)
            .with_videos(d1, &[71])
            .with_videos(d2, &[81, 82])
            .with_container(ContainerKey::section(9), 200, 1)
            .with_videos(ContainerKey::section(9), &[91]);
        let resolver = AdjacencyResolver::new(hierarchy);

        let adj = resolver.resolve(&request(71, d1)).await.unwrap();
        assert_eq!(ids(&adj.next_videos), vec![81, 82]);
        assert_eq!(adj.next_container.map(|c| c.key), Some(d2));

        let adj = resolver.resolve(&request(31, S3)).await.unwrap();
        assert!(adj.next_videos.is_empty());
    }

    #[tokio::test]
    async fn container_is_located_when_omitted() {
        let resolver = AdjacencyResolver::new(topic());
        let adj = resolver
            .resolve(&AdjacencyRequest {
                video_id: 22,
                container: None,
                viewer_id: None,
                scope: Scope::Canonical,
            })
            .await
            .unwrap();
        assert_eq!(adj.container.key, S2);
        assert_eq!(adj.previous_video.map(|v| v.video_id), Some(21));
    }

    #[tokio::test]
    async fn viewer_progression_is_passed_through() {
        let mut hierarchy = topic();
        hierarchy.progress.insert((5, 13), 0.75);
        let resolver = AdjacencyResolver::new(hierarchy);
        let adj = resolver
            .resolve(&AdjacencyRequest {
                viewer_id: Some(5),
                ..request(12, S1)
            })
            .await
            .unwrap();
        assert_eq!(adj.next_videos[0].progression, Some(0.75));
        assert_eq!(adj.previous_video.unwrap().progression, Some(0.0));
    }

    // -- private page scope ------------------------------------------------

    #[tokio::test]
    async fn private_scope_hides_uncurated_members() {
        let resolver = AdjacencyResolver::new(topic().with_page(7, &[11, 13]));
        let adj = resolver
            .resolve(&AdjacencyRequest {
                scope: Scope::PrivatePage(7),
                ..request(11, S1)
            })
            .await
            .unwrap();
        assert_eq!(ids(&adj.next_videos), vec![13]);
        assert_eq!(adj.total_in_section, 2);
        assert_eq!(adj.current_index, 0);
    }

    #[tokio::test]
    async fn private_scope_does_not_cross_into_uncurated_sibling() {
        let resolver = AdjacencyResolver::new(topic().with_page(7, &[11, 13]));
        let adj = resolver
            .resolve(&AdjacencyRequest {
                scope: Scope::PrivatePage(7),
                ..request(13, S1)
            })
            .await
            .unwrap();
        assert!(adj.next_videos.is_empty());
        assert_eq!(adj.next_container, None);
        assert_eq!(adj.previous_video.map(|v| v.video_id), Some(11));
    }

    #[tokio::test]
    async fn private_scope_filters_crossed_sibling() {
        let resolver = AdjacencyResolver::new(topic().with_page(7, &[13, 22, 31]));
        let adj = resolver
            .resolve(&AdjacencyRequest {
                scope: Scope::PrivatePage(7),
                ..request(13, S1)
            })
            .await
            .unwrap();
        assert_eq!(ids(&adj.next_videos), vec![22]);

        let adj = resolver
            .resolve(&AdjacencyRequest {
                scope: Scope::PrivatePage(7),
                ..request(22, S2)
            })
            .await
            .unwrap();
        assert_eq!(adj.previous_video.map(|v| v.video_id), Some(13));
        assert_eq!(ids(&adj.next_videos), vec![31]);
    }

    #[tokio::test]
    async fn video_outside_private_page_is_a_scope_violation() {
        let resolver = AdjacencyResolver::new(topic().with_page(7, &[11, 13]));
        let err = resolver
            .resolve(&AdjacencyRequest {
                scope: Scope::PrivatePage(7),
                ..request(12, S1)
            })
            .await
            .unwrap_err();
        assert_matches!(
            err,
            NavigationError::ScopeViolation {
                video_id: 12,
                private_page_id: 7
            }
        );
    }

    #[tokio::test]
    async fn unknown_private_page_is_rejected() {
        let resolver = AdjacencyResolver::new(topic());
        let err = resolver
            .resolve(&AdjacencyRequest {
                scope: Scope::PrivatePage(404),
                ..request(11, S1)
            })
            .await
            .unwrap_err();
        assert_matches!(err, NavigationError::PrivatePageNotFound { private_page_id: 404 });
    }

    // -- failures and outcomes ---------------------------------------------

    #[tokio::test]
    async fn video_in_wrong_container_fails_loudly() {
        let resolver = AdjacencyResolver::new(topic());
        let err = resolver.resolve(&request(21, S1)).await.unwrap_err();
        assert_matches!(err, NavigationError::VideoNotInContainer { video_id: 21, .. });
        assert!(Outcome::from_result(Err::<(), _>(err)).is_err());
    }

    #[tokio::test]
    async fn missing_container_is_empty() {
        let resolver = AdjacencyResolver::new(topic());
        let result = resolver.resolve(&request(11, ContainerKey::section(99))).await;
        assert_matches!(Outcome::from_result(result), Ok(Outcome::Empty));
    }

    #[tokio::test]
    async fn unplaced_video_is_empty() {
        let resolver = AdjacencyResolver::new(topic());
        let result = resolver
            .resolve(&AdjacencyRequest {
                video_id: 999,
                container: None,
                viewer_id: None,
                scope: Scope::Canonical,
            })
            .await;
        assert_matches!(Outcome::from_result(result), Ok(Outcome::Empty));
    }

    #[tokio::test]
    async fn store_failure_is_unavailable_not_empty() {
        let mut hierarchy = topic();
        hierarchy.failing = true;
        let resolver = AdjacencyResolver::new(hierarchy);
        let result = resolver.resolve(&request(12, S1)).await;
        assert_matches!(result, Err(NavigationError::Store(_)));
        assert_matches!(Outcome::from_result(result), Ok(Outcome::Unavailable));
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let ok = serde_json::to_value(Outcome::Ok(3)).unwrap();
        assert_eq!(ok["status"], "ok");
        assert_eq!(ok["data"], 3);
        let empty = serde_json::to_value(Outcome::<i32>::Empty).unwrap();
        assert_eq!(empty, serde_json::json!({"status": "empty"}));
        let unavailable = serde_json::to_value(Outcome::<i32>::Unavailable).unwrap();
        assert_eq!(unavailable, serde_json::json!({"status": "unavailable"}));
    }
}
