//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod container_repo;
pub mod detailed_topic_repo;
pub mod private_page_repo;
pub mod progression_repo;
pub mod reorder_repo;
pub mod topic_repo;
pub mod video_repo;

pub use container_repo::ContainerRepo;
pub use detailed_topic_repo::DetailedTopicRepo;
pub use private_page_repo::{NewPrivatePage, PrivatePageRepo};
pub use progression_repo::ProgressionRepo;
pub use reorder_repo::{ReorderError, ReorderRepo};
pub use topic_repo::TopicRepo;
pub use video_repo::VideoRepo;
