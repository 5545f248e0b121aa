//! Project (`proyectos`) model and DTOs.

use gestion_core::access::{EntityKind, Owned};
use gestion_core::error::CoreError;
use gestion_core::status::ProjectStatus;
use gestion_core::types::{Date, DbId};
use gestion_core::validation::{
    validate_delivery_window, validate_not_blank, validate_text, MAX_NAME_LENGTH,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::task::TaskDetail;

/// A row from the `proyectos` table.
///
/// `progreso` is derived from the project's tasks and is never written by the
/// create/update DTOs.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub nombre: String,
    pub descripcion: String,
    #[sqlx(try_from = "String")]
    pub estado: ProjectStatus,
    pub progreso: i32,
    #[serde(rename = "cliente")]
    pub cliente_id: DbId,
    pub fecha_inicio: Date,
    pub fecha_entrega: Date,
}

/// Ownership would resolve through the project's client, but clients carry no
/// user account link, so it never does.
impl Owned for Project {
    const KIND: EntityKind = EntityKind::Project;

    fn owner_of(&self) -> Option<DbId> {
        None
    }
}

/// A project with its tasks (and their subtasks) nested.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub tareas: Vec<TaskDetail>,
}

/// DTO for creating a project, also used as the body of a full update.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub nombre: String,
    pub descripcion: String,
    /// Defaults to `Pendiente` on insert; left unchanged on a full update if omitted.
    pub estado: Option<ProjectStatus>,
    #[serde(rename = "cliente")]
    pub cliente_id: DbId,
    pub fecha_inicio: Date,
    pub fecha_entrega: Date,
}

impl CreateProject {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_text("nombre", &self.nombre, MAX_NAME_LENGTH)?;
        validate_not_blank("descripcion", &self.descripcion)?;
        validate_delivery_window(self.fecha_inicio, self.fecha_entrega)?;
        Ok(())
    }
}

/// DTO for partially updating a project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub estado: Option<ProjectStatus>,
    #[serde(rename = "cliente")]
    pub cliente_id: Option<DbId>,
    pub fecha_inicio: Option<Date>,
    pub fecha_entrega: Option<Date>,
}

impl UpdateProject {
    /// Validate the patch as it would apply on top of `current`.
    ///
    /// The date window is checked against the merged dates, so moving only one
    /// end of the window is still caught.
    pub fn validate_against(&self, current: &Project) -> Result<(), CoreError> {
        if let Some(nombre) = &self.nombre {
            validate_text("nombre", nombre, MAX_NAME_LENGTH)?;
        }
        if let Some(descripcion) = &self.descripcion {
            validate_not_blank("descripcion", descripcion)?;
        }
        let inicio = self.fecha_inicio.unwrap_or(current.fecha_inicio);
        let entrega = self.fecha_entrega.unwrap_or(current.fecha_entrega);
        validate_delivery_window(inicio, entrega)
    }
}

impl From<CreateProject> for UpdateProject {
    fn from(input: CreateProject) -> Self {
        Self {
            nombre: Some(input.nombre),
            descripcion: Some(input.descripcion),
            estado: input.estado,
            cliente_id: Some(input.cliente_id),
            fecha_inicio: Some(input.fecha_inicio),
            fecha_entrega: Some(input.fecha_entrega),
        }
    }
}

/// Query filters for listing projects. Absent or blank fields do not constrain.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilters {
    #[serde(default, deserialize_with = "super::empty_as_none")]
    pub estado: Option<ProjectStatus>,
    #[serde(rename = "cliente", default, deserialize_with = "super::empty_as_none")]
    pub cliente_id: Option<DbId>,
}
