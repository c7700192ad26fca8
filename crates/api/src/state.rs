use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the pool is internally reference-counted and
/// the config sits behind an `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: thetable_db::DbPool,
    /// Server configuration (JWT secrets, upload directory, timeouts).
    pub config: Arc<ServerConfig>,
}
