use axum::routing::post;
use axum::Router;

use crate::handlers::populate;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/populatedb", post(populate::populate))
}
