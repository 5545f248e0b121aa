//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing, verification and strength rules.
//! - [`jwt`] -- access / refresh JWT generation and validation.

pub mod jwt;
pub mod password;
