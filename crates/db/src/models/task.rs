//! Task (`tareas`) model and DTOs.

use gestion_core::access::{EntityKind, Owned};
use gestion_core::error::CoreError;
use gestion_core::status::TaskStatus;
use gestion_core::types::{DbId, Timestamp};
use gestion_core::validation::{
    validate_not_blank, validate_progress, validate_text, MAX_NAME_LENGTH,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::subtask::Subtask;

/// A row from the `tareas` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub titulo: String,
    pub descripcion: String,
    #[sqlx(try_from = "String")]
    pub estado: TaskStatus,
    pub progreso: i32,
    #[serde(rename = "proyecto")]
    pub proyecto_id: DbId,
    pub fecha_creacion: Timestamp,
}

impl Owned for Task {
    const KIND: EntityKind = EntityKind::Task;

    fn owner_of(&self) -> Option<DbId> {
        None
    }
}

/// A task with its subtasks nested.
#[derive(Debug, Clone, Serialize)]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: Task,
    pub subtareas: Vec<Subtask>,
}

/// DTO for creating a task, also used as the body of a full update.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub titulo: String,
    pub descripcion: String,
    /// Defaults to `Pendiente` on insert.
    pub estado: Option<TaskStatus>,
    /// Defaults to 0 on insert.
    pub progreso: Option<i32>,
    #[serde(rename = "proyecto")]
    pub proyecto_id: DbId,
}

impl CreateTask {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_text("titulo", &self.titulo, MAX_NAME_LENGTH)?;
        validate_not_blank("descripcion", &self.descripcion)?;
        if let Some(progreso) = self.progreso {
            validate_progress(progreso)?;
        }
        Ok(())
    }
}

/// DTO for partially updating a task. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub estado: Option<TaskStatus>,
    pub progreso: Option<i32>,
    #[serde(rename = "proyecto")]
    pub proyecto_id: Option<DbId>,
}

impl UpdateTask {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(titulo) = &self.titulo {
            validate_text("titulo", titulo, MAX_NAME_LENGTH)?;
        }
        if let Some(descripcion) = &self.descripcion {
            validate_not_blank("descripcion", descripcion)?;
        }
        if let Some(progreso) = self.progreso {
            validate_progress(progreso)?;
        }
        Ok(())
    }
}

impl From<CreateTask> for UpdateTask {
    fn from(input: CreateTask) -> Self {
        Self {
            titulo: Some(input.titulo),
            descripcion: Some(input.descripcion),
            estado: input.estado,
            progreso: input.progreso,
            proyecto_id: Some(input.proyecto_id),
        }
    }
}

/// Query filters for listing tasks. Absent or blank fields do not constrain.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFilters {
    #[serde(default, deserialize_with = "super::empty_as_none")]
    pub estado: Option<TaskStatus>,
    #[serde(rename = "proyecto", default, deserialize_with = "super::empty_as_none")]
    pub proyecto_id: Option<DbId>,
}
