//! Handlers for the `/starships` resource.

use axum::extract::State;
use axum::Json;
use swapi_core::pagination::Page;
use swapi_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{AppPath, AppQuery};
use crate::query::NameListParams;
use crate::services::{StarshipResponse, StarshipService};
use crate::state::AppState;

/// GET /starships/?offset=&limit=&name=
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<NameListParams>,
) -> AppResult<Json<Page<StarshipResponse>>> {
    let page = params.page()?;
    let name = params.name()?;
    let starships = StarshipService::list(&state.pool, name.as_deref(), page).await?;
    Ok(Json(starships))
}

/// GET /starships/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<StarshipResponse>> {
    let starship = StarshipService::get(&state.pool, id).await?;
    Ok(Json(starship))
}
