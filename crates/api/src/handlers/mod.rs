pub mod auth;
pub mod client;
pub mod project;
pub mod subtask;
pub mod task;

use gestion_core::access::{can_access, Owned};
use gestion_core::error::CoreError;
use gestion_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

/// Resolve a fetched row against the visibility policy.
///
/// A missing row and a row the caller may not see both become 404, so a
/// denial never reveals that the row exists.
pub(crate) fn visible<E: Owned>(auth: &AuthUser, row: Option<E>, id: DbId) -> AppResult<E> {
    match row {
        Some(row) if can_access(Some(&auth.caller()), &row) => Ok(row),
        Some(_) => {
            tracing::debug!(
                user_id = auth.user_id,
                entity = E::KIND.label(),
                id,
                "Access denied, reporting not found",
            );
            Err(not_found::<E>(id))
        }
        None => Err(not_found::<E>(id)),
    }
}

pub(crate) fn not_found<E: Owned>(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: E::KIND.label(),
        id,
    })
}

/// Reject a write whose parent reference points at a missing row.
pub(crate) fn require_parent(exists: bool, field: &str, id: DbId) -> AppResult<()> {
    if exists {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "{field}: invalid pk \"{id}\" - object does not exist."
        ))))
    }
}
