use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ApiError, Result};

/// The minimum password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;
/// The exact number of digits in a mobile number.
pub const MOBILE_DIGITS: usize = 10;

/// Checks that every field has a value.
///
/// # Arguments
///
/// * `fields` - The field values, already trimmed where trimming applies.
///
/// # Returns
///
/// A `Result<()>` indicating whether all fields are filled.
pub fn validate_required(fields: &[&str]) -> Result<()> {
    if fields.iter().any(|f| f.is_empty()) {
        return Err(ApiError::Validation("Please fill in all fields".to_string()));
    }

    Ok(())
}

/// Checks that the terms and conditions were accepted.
pub fn validate_terms(accepted: bool) -> Result<()> {
    if !accepted {
        return Err(ApiError::Validation(
            "Please accept the terms and conditions".to_string(),
        ));
    }

    Ok(())
}

static EMAIL_PATTERN: Lazy<std::result::Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

/// Validates an email address.
///
/// Accepts `local@domain.tld` with no whitespace and exactly one `@`.
///
/// # Arguments
///
/// * `email` - The email to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the email is valid.
pub fn validate_email(email: &str) -> Result<()> {
    let invalid = || ApiError::Validation("Please enter a valid email address".to_string());

    let pattern = EMAIL_PATTERN.as_ref().map_err(|e| {
        tracing::error!("❌ Failed to compile email pattern: {}", e);
        invalid()
    })?;
    if !pattern.is_match(email) {
        return Err(invalid());
    }

    Ok(())
}

/// Validates a mobile number: exactly ten ASCII digits.
pub fn validate_mobile(mobile: &str) -> Result<()> {
    if mobile.len() != MOBILE_DIGITS || !mobile.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::Validation(
            "Mobile number must be exactly 10 digits".to_string(),
        ));
    }

    Ok(())
}

/// Checks that the password and its confirmation match.
pub fn validate_password_confirmation(password: &str, confirmation: &str) -> Result<()> {
    if password != confirmation {
        return Err(ApiError::Validation("Passwords do not match".to_string()));
    }

    Ok(())
}

/// Validates a password.
///
/// # Arguments
///
/// * `password` - The password to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the password is valid.
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(
            "Password must be at least 6 characters long".to_string(),
        ));
    }

    Ok(())
}
