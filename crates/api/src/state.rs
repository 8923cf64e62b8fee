use std::sync::Arc;

use swapi_importer::SwapiClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool and the HTTP client are reference-counted
/// internally and the configuration sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: swapi_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Client for the upstream dataset, used by population and `/health`.
    pub swapi: SwapiClient,
}
