//! Handlers for the `/characters` resource.

use axum::extract::State;
use axum::Json;
use swapi_core::pagination::Page;
use swapi_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{AppPath, AppQuery};
use crate::query::NameListParams;
use crate::services::{CharacterResponse, CharacterService};
use crate::state::AppState;

/// GET /characters/?offset=&limit=&name=
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<NameListParams>,
) -> AppResult<Json<Page<CharacterResponse>>> {
    let page = params.page()?;
    let name = params.name()?;
    let characters = CharacterService::list(&state.pool, name.as_deref(), page).await?;
    Ok(Json(characters))
}

/// GET /characters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<CharacterResponse>> {
    let character = CharacterService::get(&state.pool, id).await?;
    Ok(Json(character))
}
