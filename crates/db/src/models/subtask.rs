//! Subtask (`subtareas`) model and DTOs.

use gestion_core::access::{EntityKind, Owned};
use gestion_core::error::CoreError;
use gestion_core::types::{DbId, Timestamp};
use gestion_core::validation::{validate_subtask_completion, validate_text, MAX_NAME_LENGTH};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `subtareas` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subtask {
    pub id: DbId,
    pub titulo: String,
    pub completada: bool,
    #[serde(rename = "tarea")]
    pub tarea_id: DbId,
    pub fecha_creacion: Timestamp,
}

impl Owned for Subtask {
    const KIND: EntityKind = EntityKind::Subtask;

    fn owner_of(&self) -> Option<DbId> {
        None
    }
}

/// DTO for creating a subtask, also used as the body of a full update.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubtask {
    pub titulo: String,
    /// Defaults to `false` on insert.
    pub completada: Option<bool>,
    #[serde(rename = "tarea")]
    pub tarea_id: DbId,
}

impl CreateSubtask {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_text("titulo", &self.titulo, MAX_NAME_LENGTH)?;
        validate_subtask_completion(self.completada.unwrap_or(false), Some(self.tarea_id))
    }
}

/// DTO for partially updating a subtask. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSubtask {
    pub titulo: Option<String>,
    pub completada: Option<bool>,
    #[serde(rename = "tarea")]
    pub tarea_id: Option<DbId>,
}

impl UpdateSubtask {
    /// Validate the patch as it would apply on top of `current`.
    pub fn validate_against(&self, current: &Subtask) -> Result<(), CoreError> {
        if let Some(titulo) = &self.titulo {
            validate_text("titulo", titulo, MAX_NAME_LENGTH)?;
        }
        let completada = self.completada.unwrap_or(current.completada);
        let tarea = self.tarea_id.or(Some(current.tarea_id));
        validate_subtask_completion(completada, tarea)
    }
}

impl From<CreateSubtask> for UpdateSubtask {
    fn from(input: CreateSubtask) -> Self {
        Self {
            titulo: Some(input.titulo),
            completada: input.completada,
            tarea_id: Some(input.tarea_id),
        }
    }
}

/// Query filters for listing subtasks. Absent or blank fields do not constrain.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubtaskFilters {
    #[serde(rename = "tarea", default, deserialize_with = "super::empty_as_none")]
    pub tarea_id: Option<DbId>,
    #[serde(default, deserialize_with = "super::empty_as_none")]
    pub completada: Option<bool>,
}
