pub mod characters;
pub mod films;
pub mod health;
pub mod populate;
pub mod starships;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree (everything except `/health`).
///
/// ```text
/// POST /populatedb                 import the upstream dataset
///
/// GET  /characters/                list (?offset, limit, name)
/// GET  /characters/{id}            detail
///
/// GET  /films/                     list (?offset, limit, title)
/// GET  /films/{id}                 detail
///
/// GET  /starships/                 list (?offset, limit, name)
/// GET  /starships/{id}             detail
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(populate::router())
        .merge(characters::router())
        .merge(films::router())
        .merge(starships::router())
}
