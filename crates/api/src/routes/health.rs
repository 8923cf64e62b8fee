use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// `up` or `down`.
    pub database: &'static str,
    /// `up`, `down`, or `skipped` when the upstream check is disabled.
    pub upstream: &'static str,
}

/// GET /health -- always 200; the upstream check is informational only.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let upstream_check = async {
        if !state.config.health_check_upstream {
            return "skipped";
        }
        if state.swapi.ping().await {
            "up"
        } else {
            "down"
        }
    };

    let (database, upstream) = tokio::join!(swapi_db::health_check(&state.pool), upstream_check);

    let database = match database {
        Ok(()) => "up",
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            "down"
        }
    };
    let status = if database == "up" { "healthy" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database,
        upstream,
    })
}

/// Mount health check routes at root level.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
