/// Input validation for account creation. Only identity-related input
/// is validated here; everything else is the caller's problem.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{AppError, InputError};

const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321
const MIN_EMAIL_LENGTH: usize = 5;

lazy_static! {
    // RFC 5322 simplified email regex (practical validation)
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap();
}

/// Validate and normalize an email address.
pub fn is_valid_email(email: &str) -> Result<String, AppError> {
    let trimmed = email.trim();

    if trimmed.is_empty() {
        return Err(AppError::Input(InputError::InvalidEmail(
            "email is empty".to_string(),
        )));
    }

    if trimmed.len() < MIN_EMAIL_LENGTH || trimmed.len() > MAX_EMAIL_LENGTH {
        return Err(AppError::Input(InputError::InvalidEmail(
            "email length out of bounds".to_string(),
        )));
    }

    if !EMAIL_REGEX.is_match(trimmed) {
        return Err(AppError::Input(InputError::InvalidEmail(
            "email has invalid format".to_string(),
        )));
    }

    Ok(trimmed.to_string())
}
