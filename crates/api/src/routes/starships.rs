use axum::routing::get;
use axum::Router;

use crate::handlers::starship;
use crate::state::AppState;

/// Starship routes. The list answers with and without a trailing slash.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/starships", get(starship::list))
        .route("/starships/", get(starship::list))
        .route("/starships/{id}", get(starship::get_by_id))
}
