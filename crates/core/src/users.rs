//! Account rules: email normalization and registration validation.

use validator::ValidateEmail;

use crate::error::CoreError;
use crate::validation::{is_present, FieldErrors};

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Emails are stored trimmed and lowercased so uniqueness is case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// `true` for an address with a local part and a dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    email.validate_email()
        && email
            .rsplit_once('@')
            .is_some_and(|(_, domain)| domain.contains('.') && !domain.ends_with('.'))
}

/// Validate a registration request, reporting every problem at once.
pub fn validate_registration(
    email: Option<&str>,
    password: Option<&str>,
    password_confirm: Option<&str>,
) -> Result<(), CoreError> {
    let mut errors = FieldErrors::new();

    match email.map(normalize_email) {
        Some(email) if !email.is_empty() => {
            errors.check(is_valid_email(&email), "Please enter a valid email address");
        }
        _ => errors.push("Email is required"),
    }

    match password {
        Some(password) if !password.is_empty() => {
            errors.check(
                password.chars().count() >= MIN_PASSWORD_LENGTH,
                format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
            );
            errors.check(
                password_confirm == Some(password),
                "Passwords do not match",
            );
        }
        _ => errors.push("Password is required"),
    }

    errors.finish()
}

/// Validate login input before touching the store.
pub fn validate_login(email: Option<&str>, password: Option<&str>) -> Result<(), CoreError> {
    let mut errors = FieldErrors::new();
    errors.check(is_present(email), "Email is required");
    errors.check(password.is_some_and(|p| !p.is_empty()), "Password is required");
    errors.finish()
}

/// Validate an admin-supplied email change.
pub fn validate_email_update(email: &str) -> Result<(), CoreError> {
    if is_valid_email(&normalize_email(email)) {
        Ok(())
    } else {
        Err(CoreError::invalid("Please enter a valid email address"))
    }
}
