//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the authenticated user from a JWT Bearer token.
//! - [`auth::OptionalViewer`] -- the viewer if a valid token is present, else anonymous.
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.
//! - [`rbac::RequireDoctor`] -- requires `doctor` or `admin`.

pub mod auth;
pub mod rbac;
