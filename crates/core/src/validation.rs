//! Field-level validation shared by every write path.
//!
//! All checks reject with [`CoreError::Validation`]; nothing here clamps or
//! rewrites the incoming value.

use validator::ValidateEmail;

use crate::error::CoreError;
use crate::types::{Date, DbId};

/// Maximum length of names and titles (`nombre`, `empresa`, `titulo`).
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum length of an email address.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length of a login name.
pub const MAX_USERNAME_LENGTH: usize = 150;

/// Lowest accepted `progreso` value.
pub const MIN_PROGRESS: i32 = 0;

/// Highest accepted `progreso` value.
pub const MAX_PROGRESS: i32 = 100;

/// Require a non-blank value no longer than `max_len` characters.
pub fn validate_text(field: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    validate_not_blank(field, value)?;
    if value.chars().count() > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(())
}

/// Require a value that is not empty after trimming whitespace.
pub fn validate_not_blank(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be blank")));
    }
    Ok(())
}

/// Require a syntactically valid email address within the length limit.
pub fn validate_email(value: &str) -> Result<(), CoreError> {
    if value.chars().count() > MAX_EMAIL_LENGTH {
        return Err(CoreError::Validation(format!(
            "email must be at most {MAX_EMAIL_LENGTH} characters"
        )));
    }
    if !value.validate_email() {
        return Err(CoreError::Validation(format!(
            "'{value}' is not a valid email address"
        )));
    }
    Ok(())
}

/// Require `progreso` to lie within `[0, 100]`.
pub fn validate_progress(value: i32) -> Result<(), CoreError> {
    if !(MIN_PROGRESS..=MAX_PROGRESS).contains(&value) {
        return Err(CoreError::Validation(format!(
            "progreso must be between {MIN_PROGRESS} and {MAX_PROGRESS}, got {value}"
        )));
    }
    Ok(())
}

/// A project cannot be delivered before it starts. Same-day delivery is allowed.
pub fn validate_delivery_window(fecha_inicio: Date, fecha_entrega: Date) -> Result<(), CoreError> {
    if fecha_entrega < fecha_inicio {
        return Err(CoreError::Validation(
            "fecha_entrega must not be earlier than fecha_inicio".to_string(),
        ));
    }
    Ok(())
}

/// A subtask may only be marked complete while it is attached to a task.
pub fn validate_subtask_completion(completada: bool, tarea: Option<DbId>) -> Result<(), CoreError> {
    if completada && tarea.is_none() {
        return Err(CoreError::Validation(
            "a subtask must belong to a task before it can be marked complete".to_string(),
        ));
    }
    Ok(())
}

/// Login names: 1-150 characters of letters, digits and `@ . + - _`.
pub fn validate_username(value: &str) -> Result<(), CoreError> {
    validate_text("username", value, MAX_USERNAME_LENGTH)?;
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_');
    if !value.chars().all(allowed) {
        return Err(CoreError::Validation(
            "username may only contain letters, digits and @/./+/-/_".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn progress_bounds_are_inclusive() {
        assert!(validate_progress(0).is_ok());
        assert!(validate_progress(100).is_ok());
        assert_matches!(validate_progress(-1), Err(CoreError::Validation(_)));
        assert_matches!(validate_progress(101), Err(CoreError::Validation(_)));
    }

    #[test]
    fn delivery_before_start_is_rejected() {
        let err = validate_delivery_window(date(2025, 6, 1), date(2025, 5, 31)).unwrap_err();
        assert!(err.to_string().contains("fecha_entrega"));
    }

    #[test]
    fn same_day_delivery_is_accepted() {
        assert!(validate_delivery_window(date(2025, 1, 1), date(2025, 1, 1)).is_ok());
        assert!(validate_delivery_window(date(2025, 1, 1), date(2025, 12, 31)).is_ok());
    }

    #[test]
    fn completion_requires_parent_task() {
        assert!(validate_subtask_completion(true, Some(7)).is_ok());
        assert!(validate_subtask_completion(false, None).is_ok());
        assert_matches!(
            validate_subtask_completion(true, None),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn blank_and_oversized_text_is_rejected() {
        assert!(validate_text("nombre", "Acme", MAX_NAME_LENGTH).is_ok());
        assert!(validate_text("nombre", "   ", MAX_NAME_LENGTH).is_err());

        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        let err = validate_text("nombre", &long, MAX_NAME_LENGTH).unwrap_err();
        assert!(err.to_string().contains("at most 255"));
    }

    #[test]
    fn email_format_is_checked() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn username_character_set() {
        assert!(validate_username("ana.perez+qa@corp").is_ok());
        assert!(validate_username("ana perez").is_err());
        assert!(validate_username("").is_err());
    }
}
