//! Authentication primitives.
//!
//! Tokens are issued by the external identity service; this crate only
//! validates them. [`jwt::generate_access_token`] exists for tests and local
//! tooling.

pub mod jwt;
