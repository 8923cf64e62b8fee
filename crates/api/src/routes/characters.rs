use axum::routing::get;
use axum::Router;

use crate::handlers::character;
use crate::state::AppState;

/// Character routes. The list answers with and without a trailing slash.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/characters", get(character::list))
        .route("/characters/", get(character::list))
        .route("/characters/{id}", get(character::get_by_id))
}
