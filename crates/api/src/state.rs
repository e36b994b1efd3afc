use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the pool is an `Arc` internally).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: factura_db::DbPool,
    /// Server configuration (read by middleware and the auth handlers).
    pub config: Arc<ServerConfig>,
}
