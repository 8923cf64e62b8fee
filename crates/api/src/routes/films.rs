use axum::routing::get;
use axum::Router;

use crate::handlers::film;
use crate::state::AppState;

/// Film routes. The list answers with and without a trailing slash.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/films", get(film::list))
        .route("/films/", get(film::list))
        .route("/films/{id}", get(film::get_by_id))
}
