/// Password Hashing and Verification
///
/// bcrypt with the default (tunable) cost; the plaintext never leaves
/// this module and is never logged.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::{AppError, CredentialError, InputError};

/// Hash a password with a random salt.
///
/// # Errors
/// `InputError::EmptyPassword` for zero-length input; `Internal` if
/// bcrypt itself fails.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    if password.is_empty() {
        return Err(AppError::Input(InputError::EmptyPassword));
    }

    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {}", e)))
}

/// Verify a password against its stored hash.
///
/// A wrong password and a malformed stored hash both surface as
/// `CredentialError::PasswordMismatch`, so callers cannot tell the two
/// apart and neither can a probing client.
pub fn verify_password(password: &str, password_hash: &str) -> Result<(), AppError> {
    match verify(password, password_hash) {
        Ok(true) => Ok(()),
        Ok(false) => Err(AppError::Credential(CredentialError::PasswordMismatch)),
        Err(_) => Err(AppError::Credential(CredentialError::PasswordMismatch)),
    }
}
