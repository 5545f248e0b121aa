//! Handlers for the `/subtareas` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gestion_core::access::{list_scope, ListScope};
use gestion_core::types::DbId;
use gestion_db::models::subtask::{CreateSubtask, Subtask, SubtaskFilters, UpdateSubtask};
use gestion_db::repositories::{SubtaskRepo, TaskRepo};

use super::{not_found, require_parent, visible};
use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/subtareas/
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(filters): AppQuery<SubtaskFilters>,
) -> AppResult<Json<Vec<Subtask>>> {
    let subtasks = match list_scope(&auth.caller()) {
        ListScope::All => SubtaskRepo::list(&state.pool, &filters).await?,
        ListScope::Nothing => Vec::new(),
    };
    Ok(Json(subtasks))
}

/// POST /api/subtareas/
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateSubtask>,
) -> AppResult<(StatusCode, Json<Subtask>)> {
    input.validate()?;
    require_parent(
        TaskRepo::exists(&state.pool, input.tarea_id).await?,
        "tarea",
        input.tarea_id,
    )?;
    let subtask = SubtaskRepo::create(&state.pool, &input).await?;
    tracing::info!(
        subtask_id = subtask.id,
        tarea_id = subtask.tarea_id,
        user_id = auth.user_id,
        "Subtask created",
    );
    Ok((StatusCode::CREATED, Json(subtask)))
}

/// GET /api/subtareas/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Subtask>> {
    let subtask = visible(&auth, SubtaskRepo::find_by_id(&state.pool, id).await?, id)?;
    Ok(Json(subtask))
}

/// PUT /api/subtareas/{id}/
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<CreateSubtask>,
) -> AppResult<Json<Subtask>> {
    visible(&auth, SubtaskRepo::find_by_id(&state.pool, id).await?, id)?;
    input.validate()?;
    apply_update(&state, id, &input.into()).await
}

/// PATCH /api/subtareas/{id}/
pub async fn patch(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateSubtask>,
) -> AppResult<Json<Subtask>> {
    let current = visible(&auth, SubtaskRepo::find_by_id(&state.pool, id).await?, id)?;
    input.validate_against(&current)?;
    apply_update(&state, id, &input).await
}

/// DELETE /api/subtareas/{id}/
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    visible(&auth, SubtaskRepo::find_by_id(&state.pool, id).await?, id)?;
    if SubtaskRepo::delete(&state.pool, id).await? {
        tracing::info!(subtask_id = id, user_id = auth.user_id, "Subtask deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found::<Subtask>(id))
    }
}

async fn apply_update(
    state: &AppState,
    id: DbId,
    input: &UpdateSubtask,
) -> AppResult<Json<Subtask>> {
    if let Some(tarea_id) = input.tarea_id {
        require_parent(
            TaskRepo::exists(&state.pool, tarea_id).await?,
            "tarea",
            tarea_id,
        )?;
    }
    let subtask = SubtaskRepo::update(&state.pool, id, input)
        .await?
        .ok_or_else(|| not_found::<Subtask>(id))?;
    Ok(Json(subtask))
}
