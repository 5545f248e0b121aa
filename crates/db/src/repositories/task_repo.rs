//! Repository for the `tareas` table.

use gestion_core::status::TaskStatus;
use gestion_core::types::DbId;
use sqlx::PgPool;

use crate::models::task::{CreateTask, Task, TaskFilters, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, titulo, descripcion, estado, progreso, proyecto_id, fecha_creacion";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    ///
    /// `estado` defaults to `Pendiente` and `progreso` to 0 when omitted.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tareas (titulo, descripcion, estado, progreso, proyecto_id)
             VALUES ($1, $2, COALESCE($3, 'Pendiente'), COALESCE($4, 0), $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&input.titulo)
            .bind(&input.descripcion)
            .bind(input.estado.map(TaskStatus::as_str))
            .bind(input.progreso)
            .bind(input.proyecto_id)
            .fetch_one(pool)
            .await
    }

    /// Find a task by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tareas WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a task row with this ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM tareas WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List tasks matching `filters`, most recently created first.
    pub async fn list(pool: &PgPool, filters: &TaskFilters) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tareas
             WHERE ($1::TEXT IS NULL OR estado = $1)
               AND ($2::BIGINT IS NULL OR proyecto_id = $2)
             ORDER BY fecha_creacion DESC, id DESC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(filters.estado.map(TaskStatus::as_str))
            .bind(filters.proyecto_id)
            .fetch_all(pool)
            .await
    }

    /// List the tasks of several projects at once, most recently created first.
    pub async fn list_by_project_ids(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tareas
             WHERE proyecto_id = ANY($1)
             ORDER BY fecha_creacion DESC, id DESC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_ids)
            .fetch_all(pool)
            .await
    }

    /// The `progreso` of every task currently belonging to a project.
    pub async fn progress_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, i32>("SELECT progreso FROM tareas WHERE proyecto_id = $1")
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a task. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tareas SET
                titulo = COALESCE($2, titulo),
                descripcion = COALESCE($3, descripcion),
                estado = COALESCE($4, estado),
                progreso = COALESCE($5, progreso),
                proyecto_id = COALESCE($6, proyecto_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.titulo)
            .bind(&input.descripcion)
            .bind(input.estado.map(TaskStatus::as_str))
            .bind(input.progreso)
            .bind(input.proyecto_id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a task; its subtasks cascade.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tareas WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
