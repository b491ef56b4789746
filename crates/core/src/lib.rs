//! Domain logic for the video portal.
//!
//! Everything in this crate is free of I/O. Persistence lives in `medoh-db`,
//! which implements [`hierarchy::HierarchyAccessor`] against PostgreSQL.

pub mod error;
pub mod hierarchy;
pub mod navigation;
pub mod ordering;
pub mod private_page;
pub mod progression;
pub mod reorder;
pub mod roles;
pub mod types;
