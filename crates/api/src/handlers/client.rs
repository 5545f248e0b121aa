//! Handlers for the `/clientes` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gestion_core::access::{list_scope, ListScope};
use gestion_core::types::DbId;
use gestion_db::models::client::{
    Client, ClientDetail, ClientFilters, CreateClient, UpdateClient,
};
use gestion_db::repositories::{ClientRepo, DetailLoader};
use serde::Serialize;

use super::{not_found, visible};
use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Body returned by a successful deactivation.
#[derive(Debug, Serialize)]
pub struct DetailMessage {
    pub detail: &'static str,
}

/// GET /api/clientes/
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(filters): AppQuery<ClientFilters>,
) -> AppResult<Json<Vec<ClientDetail>>> {
    let clients = match list_scope(&auth.caller()) {
        ListScope::All => ClientRepo::list(&state.pool, &filters).await?,
        ListScope::Nothing => Vec::new(),
    };
    Ok(Json(DetailLoader::clients(&state.pool, clients).await?))
}

/// POST /api/clientes/
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateClient>,
) -> AppResult<(StatusCode, Json<ClientDetail>)> {
    input.validate()?;
    let client = ClientRepo::create(&state.pool, &input).await?;
    tracing::info!(client_id = client.id, user_id = auth.user_id, "Client created");
    Ok((
        StatusCode::CREATED,
        Json(DetailLoader::client(&state.pool, client).await?),
    ))
}

/// GET /api/clientes/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ClientDetail>> {
    let client = visible(&auth, ClientRepo::find_by_id(&state.pool, id).await?, id)?;
    Ok(Json(DetailLoader::client(&state.pool, client).await?))
}

/// PUT /api/clientes/{id}/
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<CreateClient>,
) -> AppResult<Json<ClientDetail>> {
    visible(&auth, ClientRepo::find_by_id(&state.pool, id).await?, id)?;
    input.validate()?;
    apply_update(&state, id, &input.into()).await
}

/// PATCH /api/clientes/{id}/
pub async fn patch(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateClient>,
) -> AppResult<Json<ClientDetail>> {
    visible(&auth, ClientRepo::find_by_id(&state.pool, id).await?, id)?;
    input.validate()?;
    apply_update(&state, id, &input).await
}

/// DELETE /api/clientes/{id}/
///
/// Logical delete: the row stays and `activo` becomes `false`.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DetailMessage>> {
    visible(&auth, ClientRepo::find_by_id(&state.pool, id).await?, id)?;
    if !ClientRepo::deactivate(&state.pool, id).await? {
        return Err(not_found::<Client>(id));
    }
    tracing::info!(client_id = id, user_id = auth.user_id, "Client deactivated");
    Ok(Json(DetailMessage {
        detail: "Cliente desactivado exitosamente.",
    }))
}

async fn apply_update(
    state: &AppState,
    id: DbId,
    input: &UpdateClient,
) -> AppResult<Json<ClientDetail>> {
    let client = ClientRepo::update(&state.pool, id, input)
        .await?
        .ok_or_else(|| not_found::<Client>(id))?;
    Ok(Json(DetailLoader::client(&state.pool, client).await?))
}
