//! Assembles the nested read-only trees embedded in API responses
//! (client → projects → tasks → subtasks).
//!
//! Each level is fetched with one `= ANY($1)` query regardless of how many
//! parents are being expanded, and children keep the ordering of the query
//! that loaded them.

use std::collections::HashMap;

use gestion_core::types::DbId;
use sqlx::PgPool;

use crate::models::client::{Client, ClientDetail};
use crate::models::project::{Project, ProjectDetail};
use crate::models::subtask::Subtask;
use crate::models::task::{Task, TaskDetail};
use crate::repositories::{ProjectRepo, SubtaskRepo, TaskRepo};

/// Loads nested children for already-fetched parent rows.
pub struct DetailLoader;

impl DetailLoader {
    /// Attach each client's projects (with their tasks and subtasks).
    pub async fn clients(
        pool: &PgPool,
        clients: Vec<Client>,
    ) -> Result<Vec<ClientDetail>, sqlx::Error> {
        if clients.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<DbId> = clients.iter().map(|c| c.id).collect();
        let projects = ProjectRepo::list_by_client_ids(pool, &ids).await?;
        let mut by_client = group_by(Self::projects(pool, projects).await?, |p| {
            p.project.cliente_id
        });

        Ok(clients
            .into_iter()
            .map(|client| ClientDetail {
                proyectos: by_client.remove(&client.id).unwrap_or_default(),
                client,
            })
            .collect())
    }

    /// Attach each project's tasks (with their subtasks).
    pub async fn projects(
        pool: &PgPool,
        projects: Vec<Project>,
    ) -> Result<Vec<ProjectDetail>, sqlx::Error> {
        if projects.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<DbId> = projects.iter().map(|p| p.id).collect();
        let tasks = TaskRepo::list_by_project_ids(pool, &ids).await?;
        let mut by_project = group_by(Self::tasks(pool, tasks).await?, |t| t.task.proyecto_id);

        Ok(projects
            .into_iter()
            .map(|project| ProjectDetail {
                tareas: by_project.remove(&project.id).unwrap_or_default(),
                project,
            })
            .collect())
    }

    /// Attach each task's subtasks.
    pub async fn tasks(pool: &PgPool, tasks: Vec<Task>) -> Result<Vec<TaskDetail>, sqlx::Error> {
        if tasks.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<DbId> = tasks.iter().map(|t| t.id).collect();
        let subtasks = SubtaskRepo::list_by_task_ids(pool, &ids).await?;
        let mut by_task: HashMap<DbId, Vec<Subtask>> = group_by(subtasks, |s| s.tarea_id);

        Ok(tasks
            .into_iter()
            .map(|task| TaskDetail {
                subtareas: by_task.remove(&task.id).unwrap_or_default(),
                task,
            })
            .collect())
    }

    /// Expand a single client.
    pub async fn client(pool: &PgPool, client: Client) -> Result<ClientDetail, sqlx::Error> {
        let projects = ProjectRepo::list_by_client_ids(pool, &[client.id]).await?;
        Ok(ClientDetail {
            proyectos: Self::projects(pool, projects).await?,
            client,
        })
    }

    /// Expand a single project.
    pub async fn project(pool: &PgPool, project: Project) -> Result<ProjectDetail, sqlx::Error> {
        let tasks = TaskRepo::list_by_project_ids(pool, &[project.id]).await?;
        Ok(ProjectDetail {
            tareas: Self::tasks(pool, tasks).await?,
            project,
        })
    }

    /// Expand a single task.
    pub async fn task(pool: &PgPool, task: Task) -> Result<TaskDetail, sqlx::Error> {
        let subtareas = SubtaskRepo::list_by_task_ids(pool, &[task.id]).await?;
        Ok(TaskDetail { task, subtareas })
    }
}

/// Group rows by parent id, preserving their relative order.
fn group_by<T>(rows: Vec<T>, parent: impl Fn(&T) -> DbId) -> HashMap<DbId, Vec<T>> {
    let mut grouped: HashMap<DbId, Vec<T>> = HashMap::new();
    for row in rows {
        grouped.entry(parent(&row)).or_default().push(row);
    }
    grouped
}
