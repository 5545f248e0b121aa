//! Repository for the `subtareas` table.

use gestion_core::types::DbId;
use sqlx::PgPool;

use crate::models::subtask::{CreateSubtask, Subtask, SubtaskFilters, UpdateSubtask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, titulo, completada, tarea_id, fecha_creacion";

/// Provides CRUD operations for subtasks.
pub struct SubtaskRepo;

impl SubtaskRepo {
    /// Insert a new subtask, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSubtask) -> Result<Subtask, sqlx::Error> {
        let query = format!(
            "INSERT INTO subtareas (titulo, completada, tarea_id)
             VALUES ($1, COALESCE($2, FALSE), $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subtask>(&query)
            .bind(&input.titulo)
            .bind(input.completada)
            .bind(input.tarea_id)
            .fetch_one(pool)
            .await
    }

    /// Find a subtask by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Subtask>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subtareas WHERE id = $1");
        sqlx::query_as::<_, Subtask>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List subtasks matching `filters`, most recently created first.
    pub async fn list(pool: &PgPool, filters: &SubtaskFilters) -> Result<Vec<Subtask>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subtareas
             WHERE ($1::BIGINT IS NULL OR tarea_id = $1)
               AND ($2::BOOLEAN IS NULL OR completada = $2)
             ORDER BY fecha_creacion DESC, id DESC"
        );
        sqlx::query_as::<_, Subtask>(&query)
            .bind(filters.tarea_id)
            .bind(filters.completada)
            .fetch_all(pool)
            .await
    }

    /// List the subtasks of several tasks at once, most recently created first.
    pub async fn list_by_task_ids(
        pool: &PgPool,
        task_ids: &[DbId],
    ) -> Result<Vec<Subtask>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subtareas
             WHERE tarea_id = ANY($1)
             ORDER BY fecha_creacion DESC, id DESC"
        );
        sqlx::query_as::<_, Subtask>(&query)
            .bind(task_ids)
            .fetch_all(pool)
            .await
    }

    /// Update a subtask. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSubtask,
    ) -> Result<Option<Subtask>, sqlx::Error> {
        let query = format!(
            "UPDATE subtareas SET
                titulo = COALESCE($2, titulo),
                completada = COALESCE($3, completada),
                tarea_id = COALESCE($4, tarea_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subtask>(&query)
            .bind(id)
            .bind(&input.titulo)
            .bind(input.completada)
            .bind(input.tarea_id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a subtask. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subtareas WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
