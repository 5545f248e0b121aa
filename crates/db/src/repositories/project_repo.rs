//! Repository for the `proyectos` table.

use gestion_core::status::ProjectStatus;
use gestion_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, ProjectFilters, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, nombre, descripcion, estado, progreso, cliente_id, fecha_inicio, fecha_entrega";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// If `estado` is `None` in the input, defaults to `Pendiente`. `progreso`
    /// always starts at 0.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO proyectos (nombre, descripcion, estado, cliente_id, fecha_inicio, fecha_entrega)
             VALUES ($1, $2, COALESCE($3, 'Pendiente'), $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.nombre)
            .bind(&input.descripcion)
            .bind(input.estado.map(ProjectStatus::as_str))
            .bind(input.cliente_id)
            .bind(input.fecha_inicio)
            .bind(input.fecha_entrega)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM proyectos WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a project row with this ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM proyectos WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List projects matching `filters`, most recently created first.
    pub async fn list(pool: &PgPool, filters: &ProjectFilters) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM proyectos
             WHERE ($1::TEXT IS NULL OR estado = $1)
               AND ($2::BIGINT IS NULL OR cliente_id = $2)
             ORDER BY id DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(filters.estado.map(ProjectStatus::as_str))
            .bind(filters.cliente_id)
            .fetch_all(pool)
            .await
    }

    /// List the projects of several clients at once, most recently created first.
    pub async fn list_by_client_ids(
        pool: &PgPool,
        client_ids: &[DbId],
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM proyectos WHERE cliente_id = ANY($1) ORDER BY id DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(client_ids)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    /// `progreso` is never touched here.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE proyectos SET
                nombre = COALESCE($2, nombre),
                descripcion = COALESCE($3, descripcion),
                estado = COALESCE($4, estado),
                cliente_id = COALESCE($5, cliente_id),
                fecha_inicio = COALESCE($6, fecha_inicio),
                fecha_entrega = COALESCE($7, fecha_entrega)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.nombre)
            .bind(&input.descripcion)
            .bind(input.estado.map(ProjectStatus::as_str))
            .bind(input.cliente_id)
            .bind(input.fecha_inicio)
            .bind(input.fecha_entrega)
            .fetch_optional(pool)
            .await
    }

    /// Write only the derived `progreso` column.
    ///
    /// Returns `false` if the project no longer exists.
    pub async fn set_progress(pool: &PgPool, id: DbId, progreso: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE proyectos SET progreso = $2 WHERE id = $1")
            .bind(id)
            .bind(progreso)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a project; its tasks and subtasks cascade.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM proyectos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
