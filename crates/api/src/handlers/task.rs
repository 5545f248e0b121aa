//! Handlers for the `/tareas` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gestion_core::access::{list_scope, ListScope};
use gestion_core::types::DbId;
use gestion_db::models::task::{CreateTask, Task, TaskDetail, TaskFilters, UpdateTask};
use gestion_db::repositories::{DetailLoader, ProjectRepo, TaskRepo};

use super::{not_found, require_parent, visible};
use crate::engine::progress::rollup_project_progress;
use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/tareas/
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(filters): AppQuery<TaskFilters>,
) -> AppResult<Json<Vec<TaskDetail>>> {
    let tasks = match list_scope(&auth.caller()) {
        ListScope::All => TaskRepo::list(&state.pool, &filters).await?,
        ListScope::Nothing => Vec::new(),
    };
    Ok(Json(DetailLoader::tasks(&state.pool, tasks).await?))
}

/// POST /api/tareas/
///
/// Recomputes the parent project's progress after the insert.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateTask>,
) -> AppResult<(StatusCode, Json<TaskDetail>)> {
    input.validate()?;
    require_parent(
        ProjectRepo::exists(&state.pool, input.proyecto_id).await?,
        "proyecto",
        input.proyecto_id,
    )?;

    let task = TaskRepo::create(&state.pool, &input).await?;
    tracing::info!(
        task_id = task.id,
        proyecto_id = task.proyecto_id,
        user_id = auth.user_id,
        "Task created",
    );
    rollup_project_progress(&state.pool, task.proyecto_id).await;
    Ok((
        StatusCode::CREATED,
        Json(DetailLoader::task(&state.pool, task).await?),
    ))
}

/// GET /api/tareas/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TaskDetail>> {
    let task = visible(&auth, TaskRepo::find_by_id(&state.pool, id).await?, id)?;
    Ok(Json(DetailLoader::task(&state.pool, task).await?))
}

/// PUT /api/tareas/{id}/
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<CreateTask>,
) -> AppResult<Json<TaskDetail>> {
    visible(&auth, TaskRepo::find_by_id(&state.pool, id).await?, id)?;
    input.validate()?;
    apply_update(&state, id, &input.into()).await
}

/// PATCH /api/tareas/{id}/
pub async fn patch(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateTask>,
) -> AppResult<Json<TaskDetail>> {
    visible(&auth, TaskRepo::find_by_id(&state.pool, id).await?, id)?;
    input.validate()?;
    apply_update(&state, id, &input).await
}

/// DELETE /api/tareas/{id}/
///
/// Hard delete; subtasks cascade. The parent's progress is not recomputed.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    visible(&auth, TaskRepo::find_by_id(&state.pool, id).await?, id)?;
    if TaskRepo::delete(&state.pool, id).await? {
        tracing::info!(task_id = id, user_id = auth.user_id, "Task deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found::<Task>(id))
    }
}

/// Persist the update, then roll up progress on the task's current project.
async fn apply_update(
    state: &AppState,
    id: DbId,
    input: &UpdateTask,
) -> AppResult<Json<TaskDetail>> {
    if let Some(proyecto_id) = input.proyecto_id {
        require_parent(
            ProjectRepo::exists(&state.pool, proyecto_id).await?,
            "proyecto",
            proyecto_id,
        )?;
    }
    let task = TaskRepo::update(&state.pool, id, input)
        .await?
        .ok_or_else(|| not_found::<Task>(id))?;
    rollup_project_progress(&state.pool, task.proyecto_id).await;
    Ok(Json(DetailLoader::task(&state.pool, task).await?))
}
