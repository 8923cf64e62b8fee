//! Handler for the one-shot import of the upstream dataset.

use axum::extract::State;
use axum::Json;
use swapi_importer::{PopulateService, PopulateSummary};

use crate::error::AppResult;
use crate::state::AppState;

/// POST /populatedb
///
/// Runs the population job to completion before responding. Safe to call
/// repeatedly: rows already present are skipped.
pub async fn populate(State(state): State<AppState>) -> AppResult<Json<PopulateSummary>> {
    let summary = PopulateService::new(&state.swapi).run(&state.pool).await?;
    Ok(Json(summary))
}
