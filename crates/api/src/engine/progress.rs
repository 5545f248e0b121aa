//! Project progress rollup.
//!
//! A project's `progreso` is the truncated mean of its tasks' `progreso`. The
//! rollup runs after a project or task is saved. It never fails the request
//! that triggered it: storage errors are logged and the stored value is left
//! as it was.

use gestion_core::progress::average_progress;
use gestion_core::types::DbId;
use gestion_db::repositories::{ProjectRepo, TaskRepo};
use sqlx::PgPool;

/// Recompute and persist the progress of `project_id`.
///
/// Returns the value written, or `None` when nothing was written (the project
/// has no tasks, no longer exists, or a storage error was logged).
pub async fn rollup_project_progress(pool: &PgPool, project_id: DbId) -> Option<i32> {
    let values = match TaskRepo::progress_by_project(pool, project_id).await {
        Ok(values) => values,
        Err(e) => {
            tracing::error!(
                project_id,
                error = %e,
                "Failed to load task progress for rollup",
            );
            return None;
        }
    };

    let Some(average) = average_progress(&values) else {
        tracing::debug!(project_id, "Project has no tasks, progress left unchanged");
        return None;
    };

    match ProjectRepo::set_progress(pool, project_id, average).await {
        Ok(true) => {
            tracing::debug!(
                project_id,
                progreso = average,
                task_count = values.len(),
                "Project progress recomputed",
            );
            Some(average)
        }
        Ok(false) => {
            tracing::warn!(project_id, "Project disappeared before progress rollup");
            None
        }
        Err(e) => {
            tracing::error!(
                project_id,
                error = %e,
                "Failed to persist project progress",
            );
            None
        }
    }
}
