use std::sync::Arc;

use medoh_db::hierarchy::PgHierarchy;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and the config sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: medoh_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractors).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: medoh_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }

    /// Store-backed hierarchy accessor for the adjacency resolver.
    pub fn hierarchy(&self) -> PgHierarchy {
        PgHierarchy::new(self.pool.clone())
    }
}
