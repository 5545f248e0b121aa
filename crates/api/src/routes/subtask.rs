use axum::routing::get;
use axum::Router;

use crate::handlers::subtask;
use crate::state::AppState;

/// Routes for the `/subtareas` resource.
///
/// ```text
/// GET    /subtareas/          -> list
/// POST   /subtareas/          -> create
/// GET    /subtareas/{id}/     -> get_by_id
/// PUT    /subtareas/{id}/     -> update
/// PATCH  /subtareas/{id}/     -> patch
/// DELETE /subtareas/{id}/     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/subtareas/", get(subtask::list).post(subtask::create))
        .route(
            "/subtareas/{id}/",
            get(subtask::get_by_id)
                .put(subtask::update)
                .patch(subtask::patch)
                .delete(subtask::delete),
        )
}
