use axum::routing::get;
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

/// Routes for the `/tareas` resource.
///
/// ```text
/// GET    /tareas/          -> list
/// POST   /tareas/          -> create
/// GET    /tareas/{id}/     -> get_by_id
/// PUT    /tareas/{id}/     -> update
/// PATCH  /tareas/{id}/     -> patch
/// DELETE /tareas/{id}/     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tareas/", get(task::list).post(task::create))
        .route(
            "/tareas/{id}/",
            get(task::get_by_id)
                .put(task::update)
                .patch(task::patch)
                .delete(task::delete),
        )
}
