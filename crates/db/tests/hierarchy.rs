//! Integration tests for the content hierarchy against a real database:
//! - Container create/list/rename/delete for both schemas
//! - Video placement (single membership across both schemas) and location
//! - `PgHierarchy` driving the adjacency resolver end to end

use assert_matches::assert_matches;
use medoh_core::hierarchy::{ContainerKey, ContainerKind, HierarchyAccessor};
use medoh_core::navigation::{AdjacencyRequest, AdjacencyResolver, NavigationError, Scope};
use medoh_core::ordering::Direction;
use medoh_core::types::DbId;
use medoh_db::hierarchy::PgHierarchy;
use medoh_db::models::container::CreateContainer;
use medoh_db::models::detailed_topic::{CreateDetailedTopic, UpdateDetailedTopic};
use medoh_db::models::topic::CreateTopic;
use medoh_db::models::video::CreateVideo;
use medoh_db::repositories::{ContainerRepo, DetailedTopicRepo, TopicRepo, VideoRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_topic(name: &str, is_detailed: bool) -> CreateTopic {
    CreateTopic {
        name: name.to_string(),
        description: None,
        image_url: None,
        topic_order: None,
        is_detailed: Some(is_detailed),
        body_part_id: None,
    }
}

fn new_container(name: &str, section_order: Option<i32>) -> CreateContainer {
    CreateContainer {
        name: name.to_string(),
        section_order,
    }
}

fn new_video(name: &str) -> CreateVideo {
    CreateVideo {
        name: name.to_string(),
        url: format!("https://cdn.example.com/{name}.mp4"),
        thumbnail_url: None,
        description: None,
        duration_secs: Some(120),
        doctor_id: None,
        question_id: None,
    }
}

/// Create `count` videos appended to `container`, returning their ids.
async fn fill(pool: &PgPool, container: ContainerKey, prefix: &str, count: usize) -> Vec<DbId> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let video = VideoRepo::create(pool, &new_video(&format!("{prefix}-{i}")))
            .await
            .unwrap();
        VideoRepo::place(pool, video.id, container, None)
            .await
            .unwrap()
            .expect("container exists");
        ids.push(video.id);
    }
    ids
}

/// Member video ids of a container in stored order.
async fn member_ids(pool: &PgPool, container: ContainerKey) -> Vec<DbId> {
    VideoRepo::list_members(pool, container, None)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.video_id)
        .collect()
}

/// Number of membership rows a video has across both schemas.
async fn membership_count(pool: &PgPool, video_id: DbId) -> i64 {
    sqlx::query_scalar(
        "SELECT (SELECT COUNT(*) FROM section_videos WHERE video_id = $1) \
              + (SELECT COUNT(*) FROM detailed_topic_section_videos WHERE video_id = $1)",
    )
    .bind(video_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// A detailed topic with one detailed section, returning the section key.
async fn detailed_section(pool: &PgPool, topic_name: &str) -> ContainerKey {
    let topic = TopicRepo::create(pool, &new_topic(topic_name, true)).await.unwrap();
    let detailed = DetailedTopicRepo::create(
        pool,
        topic.id,
        &CreateDetailedTopic {
            name: format!("{topic_name} detail"),
            description: None,
            image_url: None,
            topic_order: None,
            is_private: None,
        },
    )
    .await
    .unwrap();
    ContainerRepo::create(
        pool,
        ContainerKind::DetailedTopicSection,
        detailed.id,
        &new_container("Exercises", None),
    )
    .await
    .unwrap()
    .key
}

/// A plain topic with sections A (3 videos), B (empty), C (2 videos) and
/// D (1 video), in that order.
struct Fixture {
    topic_id: DbId,
    a: ContainerKey,
    b: ContainerKey,
    c: ContainerKey,
    d: ContainerKey,
    a_videos: Vec<DbId>,
    c_videos: Vec<DbId>,
    d_videos: Vec<DbId>,
}

async fn fixture(pool: &PgPool) -> Fixture {
    let topic = TopicRepo::create(pool, &new_topic("Cardiology", false))
        .await
        .unwrap();
    let mut keys = Vec::new();
    for name in ["A", "B", "C", "D"] {
        let c = ContainerRepo::create(pool, ContainerKind::Section, topic.id, &new_container(name, None))
            .await
            .unwrap();
        keys.push(c.key);
    }
    let a_videos = fill(pool, keys[0], "a", 3).await;
    let c_videos = fill(pool, keys[2], "c", 2).await;
    let d_videos = fill(pool, keys[3], "d", 1).await;
    Fixture {
        topic_id: topic.id,
        a: keys[0],
        b: keys[1],
        c: keys[2],
        d: keys[3],
        a_videos,
        c_videos,
        d_videos,
    }
}

fn request(video_id: DbId, container: Option<ContainerKey>) -> AdjacencyRequest {
    AdjacencyRequest {
        video_id,
        container,
        viewer_id: None,
        scope: Scope::Canonical,
    }
}

// ---------------------------------------------------------------------------
// Test: containers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_containers_append_and_list_in_order(pool: PgPool) {
    let f = fixture(&pool).await;

    let listed = ContainerRepo::list_by_parent(&pool, ContainerKind::Section, f.topic_id)
        .await
        .unwrap();
    let names: Vec<&str> = listed.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C", "D"]);
    let orders: Vec<i32> = listed.iter().map(|c| c.order).collect();
    assert_eq!(orders, vec![0, 1, 2, 3]);
    assert!(listed.iter().all(|c| c.parent_id == f.topic_id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_container_rename_and_delete(pool: PgPool) {
    let f = fixture(&pool).await;

    let renamed = ContainerRepo::rename(&pool, f.b, "Bridging")
        .await
        .unwrap()
        .expect("container exists");
    assert_eq!(renamed.name, "Bridging");

    assert!(ContainerRepo::delete(&pool, f.a).await.unwrap());
    assert!(!ContainerRepo::delete(&pool, f.a).await.unwrap());
    assert!(ContainerRepo::find(&pool, f.a).await.unwrap().is_none());

    // Memberships cascade; the videos themselves survive.
    assert!(VideoRepo::locate(&pool, f.a_videos[0]).await.unwrap().is_none());
    assert!(VideoRepo::find_by_id(&pool, f.a_videos[0]).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_detailed_containers_use_their_own_schema(pool: PgPool) {
    let topic = TopicRepo::create(&pool, &new_topic("Orthopedics", true))
        .await
        .unwrap();
    let detailed = DetailedTopicRepo::create(
        &pool,
        topic.id,
        &CreateDetailedTopic {
            name: "Knee".to_string(),
            description: None,
            image_url: None,
            topic_order: None,
            is_private: None,
        },
    )
    .await
    .unwrap();

    let section = ContainerRepo::create(
        &pool,
        ContainerKind::DetailedTopicSection,
        detailed.id,
        &new_container("Anatomy", None),
    )
    .await
    .unwrap();
    assert_eq!(section.key.kind, ContainerKind::DetailedTopicSection);
    assert_eq!(section.parent_id, detailed.id);

    // Same numeric id in the other schema is a different container.
    assert!(ContainerRepo::find(&pool, ContainerKey::section(section.key.id))
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_detailed_topic_update_moves_it_in_listing(pool: PgPool) {
    let topic = TopicRepo::create(&pool, &new_topic("Orthopedics", true))
        .await
        .unwrap();
    let mut ids = Vec::new();
    for name in ["Knee", "Hip"] {
        let detailed = DetailedTopicRepo::create(
            &pool,
            topic.id,
            &CreateDetailedTopic {
                name: name.to_string(),
                description: None,
                image_url: None,
                topic_order: None,
                is_private: None,
            },
        )
        .await
        .unwrap();
        ids.push(detailed.id);
    }

    let updated = DetailedTopicRepo::update(
        &pool,
        ids[1],
        &UpdateDetailedTopic {
            name: Some("Hip and pelvis".to_string()),
            description: None,
            image_url: None,
            topic_order: Some(-1),
            is_private: Some(true),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.name, "Hip and pelvis");
    assert_eq!(updated.topic_order, -1);
    assert!(updated.is_private);

    let all: Vec<DbId> = DetailedTopicRepo::list_by_topic(&pool, topic.id, true)
        .await
        .unwrap()
        .iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(all, vec![ids[1], ids[0]]);

    let public = DetailedTopicRepo::list_by_topic(&pool, topic.id, false)
        .await
        .unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].id, ids[0]);

    // Fields left out keep their values.
    let untouched = DetailedTopicRepo::find_by_id(&pool, ids[0]).await.unwrap().unwrap();
    assert_eq!(untouched.name, "Knee");

    let missing = DetailedTopicRepo::update(
        &pool,
        999_999,
        &UpdateDetailedTopic {
            name: Some("Nope".to_string()),
            description: None,
            image_url: None,
            topic_order: None,
            is_private: None,
        },
    )
    .await
    .unwrap();
    assert!(missing.is_none());
}

// ---------------------------------------------------------------------------
// Test: placement and location
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_place_moves_single_membership_across_schemas(pool: PgPool) {
    let f = fixture(&pool).await;
    let topic = TopicRepo::create(&pool, &new_topic("Spine", true)).await.unwrap();
    let detailed = DetailedTopicRepo::create(
        &pool,
        topic.id,
        &CreateDetailedTopic {
            name: "Lumbar".to_string(),
            description: None,
            image_url: None,
            topic_order: None,
            is_private: None,
        },
    )
    .await
    .unwrap();
    let target = ContainerRepo::create(
        &pool,
        ContainerKind::DetailedTopicSection,
        detailed.id,
        &new_container("Exercises", None),
    )
    .await
    .unwrap();

    let video_id = f.a_videos[1];
    VideoRepo::place(&pool, video_id, target.key, None)
        .await
        .unwrap()
        .expect("container exists");

    let location = VideoRepo::locate(&pool, video_id).await.unwrap().unwrap();
    assert_eq!(location.container, target.key);
    assert_eq!(location.parent_id, detailed.id);
    assert_eq!(location.parent_name, "Lumbar");
    assert_eq!(location.video_order, 0);

    let remaining = member_ids(&pool, f.a).await;
    assert_eq!(remaining, vec![f.a_videos[0], f.a_videos[2]]);
    assert_eq!(membership_count(&pool, video_id).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_placements_across_schemas_keep_one_membership(pool: PgPool) {
    let f = fixture(&pool).await;
    let detailed = detailed_section(&pool, "Spine").await;

    for i in 0..20 {
        let video = VideoRepo::create(&pool, &new_video(&format!("race-{i}")))
            .await
            .unwrap();
        let (plain, other) = tokio::join!(
            VideoRepo::place(&pool, video.id, f.b, None),
            VideoRepo::place(&pool, video.id, detailed, None),
        );
        plain.unwrap().expect("container exists");
        other.unwrap().expect("container exists");

        assert_eq!(membership_count(&pool, video.id).await, 1, "video {}", video.id);
        let location = VideoRepo::locate(&pool, video.id).await.unwrap().unwrap();
        assert!(location.container == f.b || location.container == detailed);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_place_into_missing_container_returns_none(pool: PgPool) {
    let f = fixture(&pool).await;
    let placed = VideoRepo::place(&pool, f.a_videos[0], ContainerKey::section(999_999), None)
        .await
        .unwrap();
    assert!(placed.is_none());

    // The failed placement left the original membership alone.
    let location = VideoRepo::locate(&pool, f.a_videos[0]).await.unwrap().unwrap();
    assert_eq!(location.container, f.a);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_locate_reports_plain_section_and_topic(pool: PgPool) {
    let f = fixture(&pool).await;
    let location = VideoRepo::locate(&pool, f.c_videos[1]).await.unwrap().unwrap();
    assert_eq!(location.container, f.c);
    assert_eq!(location.container_name, "C");
    assert_eq!(location.section_order, 2);
    assert_eq!(location.video_order, 1);
    assert_eq!(location.parent_id, f.topic_id);
    assert_eq!(location.parent_name, "Cardiology");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unplace_removes_membership(pool: PgPool) {
    let f = fixture(&pool).await;
    assert!(VideoRepo::unplace(&pool, f.d_videos[0]).await.unwrap());
    assert!(!VideoRepo::unplace(&pool, f.d_videos[0]).await.unwrap());
    assert!(VideoRepo::locate(&pool, f.d_videos[0]).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Test: PgHierarchy + resolver
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sibling_container_skips_by_order(pool: PgPool) {
    let f = fixture(&pool).await;
    let hierarchy = PgHierarchy::new(pool.clone());
    let b = hierarchy.container(f.b).await.unwrap().unwrap();

    let before = hierarchy.sibling_container(&b, Direction::Before).await.unwrap();
    let after = hierarchy.sibling_container(&b, Direction::After).await.unwrap();
    assert_eq!(before.map(|c| c.key), Some(f.a));
    assert_eq!(after.map(|c| c.key), Some(f.c));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resolve_middle_of_container(pool: PgPool) {
    let f = fixture(&pool).await;
    let resolver = AdjacencyResolver::new(PgHierarchy::new(pool.clone()));

    let adj = resolver
        .resolve(&request(f.a_videos[1], Some(f.a)))
        .await
        .unwrap();
    assert_eq!(adj.previous_video.map(|v| v.video_id), Some(f.a_videos[0]));
    let next: Vec<DbId> = adj.next_videos.iter().map(|v| v.video_id).collect();
    assert_eq!(next, vec![f.a_videos[2]]);
    assert!(adj.next_container.is_none());
    assert_eq!(adj.total_in_section, 3);
    assert_eq!(adj.current_index, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resolve_stops_at_empty_next_sibling(pool: PgPool) {
    let f = fixture(&pool).await;
    let resolver = AdjacencyResolver::new(PgHierarchy::new(pool.clone()));

    // A is followed by the empty B; the search does not continue to C.
    let adj = resolver
        .resolve(&request(f.a_videos[2], Some(f.a)))
        .await
        .unwrap();
    assert!(adj.next_videos.is_empty());
    assert!(adj.next_container.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resolve_crosses_into_neighbours(pool: PgPool) {
    let f = fixture(&pool).await;
    let resolver = AdjacencyResolver::new(PgHierarchy::new(pool.clone()));

    // Last of C: next comes from D.
    let adj = resolver.resolve(&request(f.c_videos[1], None)).await.unwrap();
    let next: Vec<DbId> = adj.next_videos.iter().map(|v| v.video_id).collect();
    assert_eq!(next, f.d_videos);
    assert_eq!(adj.next_container.map(|c| c.key), Some(f.d));

    // First of D: previous is the last of C.
    let adj = resolver.resolve(&request(f.d_videos[0], None)).await.unwrap();
    assert_eq!(adj.previous_video.map(|v| v.video_id), Some(f.c_videos[1]));
    assert!(adj.next_videos.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resolve_contract_errors(pool: PgPool) {
    let f = fixture(&pool).await;
    let resolver = AdjacencyResolver::new(PgHierarchy::new(pool.clone()));

    assert_matches!(
        resolver.resolve(&request(f.a_videos[0], Some(f.c))).await,
        Err(NavigationError::VideoNotInContainer { .. })
    );
    assert_matches!(
        resolver
            .resolve(&request(f.a_videos[0], Some(ContainerKey::detailed(f.a.id))))
            .await,
        Err(NavigationError::ContainerNotFound { .. })
    );

    let loose = VideoRepo::create(&pool, &new_video("loose")).await.unwrap();
    assert_matches!(
        resolver.resolve(&request(loose.id, None)).await,
        Err(NavigationError::VideoNotPlaced { .. })
    );
}
