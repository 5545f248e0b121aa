//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use gestion_core::access::Caller;
use gestion_core::error::CoreError;
use gestion_core::roles::Role;
use gestion_core::types::DbId;
use gestion_db::repositories::UserRepo;

use crate::auth::jwt::{validate_token, TokenType};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// Only access tokens are accepted; presenting a refresh token yields 401.
/// The account is reloaded on every request: a deactivated or deleted user is
/// rejected even while the token is unexpired, and the role comes from the
/// stored profile rather than from the claims.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The role currently stored in the user's profile.
    pub role: Role,
}

impl AuthUser {
    /// The principal handed to the visibility policy.
    pub fn caller(&self) -> Caller {
        Caller::new(self.user_id, self.role)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, TokenType::Access, state.jwt()).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let profile = UserRepo::find_active_profile(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| {
                tracing::debug!(user_id = claims.sub, "Token for missing or inactive user");
                AppError::Core(CoreError::Unauthorized(
                    "User not found or inactive".into(),
                ))
            })?;

        Ok(AuthUser {
            user_id: profile.user_id,
            role: profile.role,
        })
    }
}
