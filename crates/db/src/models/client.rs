//! Client (`clientes`) model and DTOs.

use gestion_core::access::{EntityKind, Owned};
use gestion_core::error::CoreError;
use gestion_core::types::{DbId, Timestamp};
use gestion_core::validation::{validate_email, validate_text, MAX_NAME_LENGTH};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::project::ProjectDetail;

/// A row from the `clientes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub nombre: String,
    pub email: String,
    pub empresa: String,
    pub activo: bool,
    pub fecha_creacion: Timestamp,
}

/// Clients have no linked user account, so no non-admin caller owns one.
impl Owned for Client {
    const KIND: EntityKind = EntityKind::Client;

    fn owner_of(&self) -> Option<DbId> {
        None
    }
}

/// A client with its projects (and their tasks and subtasks) nested.
#[derive(Debug, Clone, Serialize)]
pub struct ClientDetail {
    #[serde(flatten)]
    pub client: Client,
    pub proyectos: Vec<ProjectDetail>,
}

/// DTO for creating a client, also used as the body of a full update.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClient {
    pub nombre: String,
    pub email: String,
    pub empresa: String,
    /// Defaults to `true` on insert; left unchanged on a full update if omitted.
    pub activo: Option<bool>,
}

impl CreateClient {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_text("nombre", &self.nombre, MAX_NAME_LENGTH)?;
        validate_email(&self.email)?;
        validate_text("empresa", &self.empresa, MAX_NAME_LENGTH)?;
        Ok(())
    }
}

/// DTO for partially updating a client. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClient {
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub empresa: Option<String>,
    pub activo: Option<bool>,
}

impl UpdateClient {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(nombre) = &self.nombre {
            validate_text("nombre", nombre, MAX_NAME_LENGTH)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(empresa) = &self.empresa {
            validate_text("empresa", empresa, MAX_NAME_LENGTH)?;
        }
        Ok(())
    }
}

impl From<CreateClient> for UpdateClient {
    fn from(input: CreateClient) -> Self {
        Self {
            nombre: Some(input.nombre),
            email: Some(input.email),
            empresa: Some(input.empresa),
            activo: input.activo,
        }
    }
}

/// Query filters for listing clients. Absent or blank fields do not constrain.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientFilters {
    #[serde(default, deserialize_with = "super::empty_as_none")]
    pub activo: Option<bool>,
    #[serde(default, deserialize_with = "super::empty_as_none")]
    pub empresa: Option<String>,
}
