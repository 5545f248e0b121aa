use axum::routing::get;
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes for the `/proyectos` resource.
///
/// ```text
/// GET    /proyectos/          -> list
/// POST   /proyectos/          -> create
/// GET    /proyectos/{id}/     -> get_by_id
/// PUT    /proyectos/{id}/     -> update
/// PATCH  /proyectos/{id}/     -> patch
/// DELETE /proyectos/{id}/     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/proyectos/", get(project::list).post(project::create))
        .route(
            "/proyectos/{id}/",
            get(project::get_by_id)
                .put(project::update)
                .patch(project::patch)
                .delete(project::delete),
        )
}
