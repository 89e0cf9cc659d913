//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits mirror the create/update payload constraints in `shared`
//! so handler-level checks and derive-level checks agree.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: clinic, doctor, account display strings
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, audit comments
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, gender, title codes
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// URLs / stored-object keys for qualification documents
pub const MAX_URL_LEN: usize = 2048;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_rejects_blank() {
        assert!(validate_required_text("  ", "comment", MAX_NOTE_LEN).is_err());
        assert!(validate_required_text("资质齐全", "comment", MAX_NOTE_LEN).is_ok());
    }

    #[test]
    fn test_required_text_rejects_overlong() {
        let long = "x".repeat(MAX_NOTE_LEN + 1);
        assert!(validate_required_text(&long, "comment", MAX_NOTE_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "email", MAX_EMAIL_LEN).is_ok());
        let long = Some("x".repeat(MAX_EMAIL_LEN + 1));
        assert!(validate_optional_text(&long, "email", MAX_EMAIL_LEN).is_err());
    }
}
