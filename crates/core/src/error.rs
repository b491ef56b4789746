use crate::types::DbId;

/// Domain errors shared by the db and api layers.
///
/// Navigation has its own taxonomy in [`crate::navigation::NavigationError`]
/// because its failures map onto the `ok / empty / unavailable` outcome set
/// rather than onto plain HTTP statuses.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}
