use axum::routing::get;
use axum::Router;

use crate::handlers::client;
use crate::state::AppState;

/// Routes for the `/clientes` resource.
///
/// ```text
/// GET    /clientes/          -> list
/// POST   /clientes/          -> create
/// GET    /clientes/{id}/     -> get_by_id
/// PUT    /clientes/{id}/     -> update
/// PATCH  /clientes/{id}/     -> patch
/// DELETE /clientes/{id}/     -> delete (soft: sets activo = false)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clientes/", get(client::list).post(client::create))
        .route(
            "/clientes/{id}/",
            get(client::get_by_id)
                .put(client::update)
                .patch(client::patch)
                .delete(client::delete),
        )
}
