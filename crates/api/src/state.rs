use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool.
    pub pool: barter_db::DbPool,
    /// Server configuration (behind `Arc` for cheap cloning).
    pub config: Arc<ServerConfig>,
}
