//! Handlers for the `/proyectos` resource.
//!
//! Every successful create or update re-runs the progress rollup for the
//! project so the response carries the recomputed `progreso`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gestion_core::access::{list_scope, ListScope};
use gestion_core::types::DbId;
use gestion_db::models::project::{
    CreateProject, Project, ProjectDetail, ProjectFilters, UpdateProject,
};
use gestion_db::repositories::{ClientRepo, DetailLoader, ProjectRepo};

use super::{not_found, require_parent, visible};
use crate::engine::progress::rollup_project_progress;
use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/proyectos/
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(filters): AppQuery<ProjectFilters>,
) -> AppResult<Json<Vec<ProjectDetail>>> {
    let projects = match list_scope(&auth.caller()) {
        ListScope::All => ProjectRepo::list(&state.pool, &filters).await?,
        ListScope::Nothing => Vec::new(),
    };
    Ok(Json(DetailLoader::projects(&state.pool, projects).await?))
}

/// POST /api/proyectos/
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateProject>,
) -> AppResult<(StatusCode, Json<ProjectDetail>)> {
    input.validate()?;
    require_parent(
        ClientRepo::exists(&state.pool, input.cliente_id).await?,
        "cliente",
        input.cliente_id,
    )?;

    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(
        project_id = project.id,
        cliente_id = project.cliente_id,
        user_id = auth.user_id,
        "Project created",
    );
    let detail = with_rollup(&state, project).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/proyectos/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectDetail>> {
    let project = visible(&auth, ProjectRepo::find_by_id(&state.pool, id).await?, id)?;
    Ok(Json(DetailLoader::project(&state.pool, project).await?))
}

/// PUT /api/proyectos/{id}/
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<CreateProject>,
) -> AppResult<Json<ProjectDetail>> {
    visible(&auth, ProjectRepo::find_by_id(&state.pool, id).await?, id)?;
    input.validate()?;
    apply_update(&state, id, &input.into()).await
}

/// PATCH /api/proyectos/{id}/
pub async fn patch(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateProject>,
) -> AppResult<Json<ProjectDetail>> {
    let current = visible(&auth, ProjectRepo::find_by_id(&state.pool, id).await?, id)?;
    input.validate_against(&current)?;
    apply_update(&state, id, &input).await
}

/// DELETE /api/proyectos/{id}/
///
/// Hard delete; tasks and subtasks cascade.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    visible(&auth, ProjectRepo::find_by_id(&state.pool, id).await?, id)?;
    if ProjectRepo::delete(&state.pool, id).await? {
        tracing::info!(project_id = id, user_id = auth.user_id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found::<Project>(id))
    }
}

async fn apply_update(
    state: &AppState,
    id: DbId,
    input: &UpdateProject,
) -> AppResult<Json<ProjectDetail>> {
    if let Some(cliente_id) = input.cliente_id {
        require_parent(
            ClientRepo::exists(&state.pool, cliente_id).await?,
            "cliente",
            cliente_id,
        )?;
    }
    let project = ProjectRepo::update(&state.pool, id, input)
        .await?
        .ok_or_else(|| not_found::<Project>(id))?;
    Ok(Json(with_rollup(state, project).await?))
}

/// Run the rollup and expand the project with the recomputed value.
async fn with_rollup(state: &AppState, mut project: Project) -> AppResult<ProjectDetail> {
    if let Some(progreso) = rollup_project_progress(&state.pool, project.id).await {
        project.progreso = progreso;
    }
    Ok(DetailLoader::project(&state.pool, project).await?)
}
