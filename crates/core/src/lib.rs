//! Domain rules for the project-management backend.
//!
//! Nothing in this crate performs I/O. The `db` crate maps rows onto these
//! types and the `api` crate enforces them at request time.

pub mod access;
pub mod error;
pub mod progress;
pub mod roles;
pub mod status;
pub mod types;
pub mod validation;
