//! Handlers for the `/films` resource.

use axum::extract::State;
use axum::Json;
use swapi_core::pagination::Page;
use swapi_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{AppPath, AppQuery};
use crate::query::TitleListParams;
use crate::services::{FilmResponse, FilmService};
use crate::state::AppState;

/// GET /films/?offset=&limit=&title=
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<TitleListParams>,
) -> AppResult<Json<Page<FilmResponse>>> {
    let page = params.page()?;
    let title = params.title()?;
    let films = FilmService::list(&state.pool, title.as_deref(), page).await?;
    Ok(Json(films))
}

/// GET /films/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<FilmResponse>> {
    let film = FilmService::get(&state.pool, id).await?;
    Ok(Json(film))
}
