use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Authentication routes. None of them require a bearer token.
///
/// ```text
/// POST /auth/register/        -> register
/// POST /auth/token/           -> obtain_token
/// POST /auth/token/refresh/   -> refresh_token
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register/", post(auth::register))
        .route("/auth/token/", post(auth::obtain_token))
        .route("/auth/token/refresh/", post(auth::refresh_token))
}
