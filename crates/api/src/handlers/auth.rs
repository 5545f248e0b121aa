//! Handlers for the `/auth` resource (registration, token pair, refresh).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use gestion_core::error::CoreError;
use gestion_core::roles::Role;
use gestion_core::validation::{validate_email, validate_username};
use gestion_db::models::user::{CreateUser, Profile, User};
use gestion_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{
    generate_access_token, generate_refresh_token, validate_token, TokenType,
};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

/// Message returned for any failed credential check, so callers cannot tell
/// an unknown username from a wrong password or an inactive account.
const BAD_CREDENTIALS: &str = "No active account found with the given credentials";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register/`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: String,
    pub role: Option<Role>,
}

/// Request body for `POST /auth/token/`.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/token/refresh/`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Token pair returned by `POST /auth/token/`.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// New access token returned by `POST /auth/token/refresh/`.
#[derive(Debug, Serialize)]
pub struct AccessToken {
    pub access: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register/
///
/// Open to anonymous callers. Creates the user and its profile atomically.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    validate_username(&input.username)?;
    validate_password_strength(&input.password)?;
    if !input.email.is_empty() {
        validate_email(&input.email)?;
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let (user, profile) = UserRepo::create_with_profile(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
            role: input.role.unwrap_or_default(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %profile.role, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Usuario creado exitosamente",
        }),
    ))
}

/// POST /api/auth/token/
///
/// Exchange username + password for an access / refresh token pair.
pub async fn obtain_token(
    State(state): State<AppState>,
    AppJson(input): AppJson<TokenRequest>,
) -> AppResult<Json<TokenPair>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(bad_credentials)?;

    let valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !valid || !user.is_active {
        tracing::debug!(user_id = user.id, "Rejected token request");
        return Err(bad_credentials());
    }

    let profile = load_profile(&state, &user).await?;
    let jwt = state.jwt();
    let access = generate_access_token(user.id, profile.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;
    let refresh = generate_refresh_token(user.id, profile.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, "Issued token pair");
    Ok(Json(TokenPair { access, refresh }))
}

/// POST /api/auth/token/refresh/
///
/// Exchange a valid refresh token for a new access token carrying the role
/// currently stored in the profile. Inactive users are refused.
pub async fn refresh_token(
    State(state): State<AppState>,
    AppJson(input): AppJson<RefreshRequest>,
) -> AppResult<Json<AccessToken>> {
    let claims = validate_token(&input.refresh, TokenType::Refresh, state.jwt())
        .map_err(|_| {
            AppError::Core(CoreError::Unauthorized(
                "Token is invalid or expired".into(),
            ))
        })?;

    let profile = UserRepo::find_active_profile(&state.pool, claims.sub)
        .await?
        .ok_or_else(bad_credentials)?;

    let access = generate_access_token(profile.user_id, profile.role, state.jwt())
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    Ok(Json(AccessToken { access }))
}

fn bad_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(BAD_CREDENTIALS.into()))
}

/// Every user is created with a profile; a missing one is a broken invariant.
async fn load_profile(state: &AppState, user: &User) -> AppResult<Profile> {
    UserRepo::find_profile(&state.pool, user.id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Internal(format!(
                "User {} has no profile",
                user.id
            )))
        })
}
