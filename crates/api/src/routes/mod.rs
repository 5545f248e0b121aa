pub mod auth;
pub mod client;
pub mod health;
pub mod project;
pub mod subtask;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register/                 register (public)
/// /auth/token/                    obtain token pair (public)
/// /auth/token/refresh/            refresh access token (public)
///
/// /clientes/                      list, create
/// /clientes/{id}/                 get, put, patch, deactivate
///
/// /proyectos/                     list, create
/// /proyectos/{id}/                get, put, patch, delete
///
/// /tareas/                        list, create
/// /tareas/{id}/                   get, put, patch, delete
///
/// /subtareas/                     list, create
/// /subtareas/{id}/                get, put, patch, delete
/// ```
///
/// Paths keep their trailing slash, so each resource router declares its full
/// paths and is merged rather than nested.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(client::router())
        .merge(project::router())
        .merge(task::router())
        .merge(subtask::router())
}
