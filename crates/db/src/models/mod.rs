//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO, used for POST and for full (PUT) updates
//! - A `Deserialize` update DTO (all `Option` fields) for PATCH
//!
//! Entity structs also implement [`gestion_core::access::Owned`].

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

pub mod client;
pub mod project;
pub mod subtask;
pub mod task;
pub mod user;

/// Deserializes a query-string filter value, treating a missing or blank
/// value (`?empresa=`) as no constraint.
pub(crate) fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
