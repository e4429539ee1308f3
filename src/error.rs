/// Unified Error Handling Module
///
/// Every failure in the auth subsystem is surfaced to the caller as a
/// typed error; nothing is recovered internally. The HTTP layer maps
/// each error to a status code and a generic, non-leaking message,
/// while the internal detail goes to the structured log only.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::error::Error as StdError;
use std::fmt;

/// Invalid input supplied by the caller (empty password, malformed
/// Authorization header, bad email format).
#[derive(Debug, Clone)]
pub enum InputError {
    EmptyPassword,
    MissingAuthorization,
    MalformedAuthorization,
    InvalidEmail(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::EmptyPassword => write!(f, "password is empty"),
            InputError::MissingAuthorization => {
                write!(f, "Authorization header is missing or empty")
            }
            InputError::MalformedAuthorization => {
                write!(f, "Authorization header is malformed")
            }
            InputError::InvalidEmail(reason) => write!(f, "invalid email: {}", reason),
        }
    }
}

impl StdError for InputError {}

/// A presented credential did not check out. All variants are equally
/// terminal; callers only need "valid" vs "invalid, with a reason".
#[derive(Debug, Clone)]
pub enum CredentialError {
    PasswordMismatch,
    SignatureInvalid,
    Expired,
    WrongIssuer(String),
    MalformedSubject,
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::PasswordMismatch => write!(f, "password does not match"),
            CredentialError::SignatureInvalid => write!(f, "token signature is invalid"),
            CredentialError::Expired => write!(f, "token has expired or been revoked"),
            CredentialError::WrongIssuer(iss) => {
                write!(f, "token issuer '{}' is not this service", iss)
            }
            CredentialError::MalformedSubject => {
                write!(f, "token subject is missing or not a valid user id")
            }
        }
    }
}

impl StdError for CredentialError {}

/// Persistence layer failures.
#[derive(Debug)]
pub enum StorageError {
    UniqueViolation(String),
    NotFound(String),
    ConnectionPool(String),
    Query(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::UniqueViolation(msg) => write!(f, "duplicate entry: {}", msg),
            StorageError::NotFound(msg) => write!(f, "not found: {}", msg),
            StorageError::ConnectionPool(msg) => {
                write!(f, "database connection error: {}", msg)
            }
            StorageError::Query(msg) => write!(f, "query error: {}", msg),
        }
    }
}

impl StdError for StorageError {}

/// Central error type used for control flow across the application.
#[derive(Debug)]
pub enum AppError {
    Input(InputError),
    Credential(CredentialError),
    Storage(StorageError),
    Randomness(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Input(e) => write!(f, "{}", e),
            AppError::Credential(e) => write!(f, "{}", e),
            AppError::Storage(e) => write!(f, "{}", e),
            AppError::Randomness(msg) => write!(f, "randomness unavailable: {}", msg),
            AppError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl StdError for AppError {}

impl From<InputError> for AppError {
    fn from(err: InputError) -> Self {
        AppError::Input(err)
    }
}

impl From<CredentialError> for AppError {
    fn from(err: CredentialError) -> Self {
        AppError::Credential(err)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => {
                AppError::Storage(StorageError::NotFound("record not found".to_string()))
            }
            sqlx::Error::Database(db_err)
                if db_err.message().contains("unique constraint")
                    || db_err.message().contains("duplicate key") =>
            {
                AppError::Storage(StorageError::UniqueViolation(
                    "record already exists".to_string(),
                ))
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                AppError::Storage(StorageError::ConnectionPool(err.to_string()))
            }
            _ => AppError::Storage(StorageError::Query(err.to_string())),
        }
    }
}

/// Error response body returned to clients. Messages here are generic
/// on purpose; the matching detail lives only in the server log, keyed
/// by `error_id`.
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error_id: String,
    pub message: String,
    pub code: String,
    pub status: u16,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_id: String, message: String, code: String, status: u16) -> Self {
        Self {
            error_id,
            message,
            code,
            status,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl AppError {
    fn response_parts(&self, error_id: &str) -> (StatusCode, ErrorResponse) {
        let (status, code, message) = match self {
            AppError::Input(e) => match e {
                InputError::MissingAuthorization | InputError::MalformedAuthorization => (
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHORIZED",
                    "You're not logged in.".to_string(),
                ),
                _ => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string()),
            },

            AppError::Credential(e) => match e {
                CredentialError::PasswordMismatch => (
                    StatusCode::UNAUTHORIZED,
                    "INVALID_CREDENTIALS",
                    "Incorrect email or password".to_string(),
                ),
                _ => (
                    StatusCode::UNAUTHORIZED,
                    "TOKEN_INVALID",
                    "Invalid or expired token".to_string(),
                ),
            },

            AppError::Storage(e) => match e {
                // The only lookups that can miss are credentials
                // (refresh token, session user), so a miss is an auth
                // failure from the client's point of view.
                StorageError::NotFound(_) => (
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHORIZED",
                    "Please log in again.".to_string(),
                ),
                StorageError::UniqueViolation(_) => {
                    (StatusCode::CONFLICT, "DUPLICATE_ENTRY", e.to_string())
                }
                StorageError::ConnectionPool(_) => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    "Service temporarily unavailable".to_string(),
                ),
                StorageError::Query(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Something went wrong".to_string(),
                ),
            },

            AppError::Randomness(_) | AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Something went wrong".to_string(),
            ),
        };

        let body = ErrorResponse::new(
            error_id.to_string(),
            message,
            code.to_string(),
            status.as_u16(),
        );
        (status, body)
    }

    fn log(&self, error_id: &str) {
        match self {
            AppError::Input(e) => {
                tracing::warn!(error_id = error_id, error = %e, "Invalid input");
            }
            AppError::Credential(e) => {
                tracing::warn!(error_id = error_id, error = %e, "Credential check failed");
            }
            AppError::Storage(StorageError::NotFound(msg)) => {
                tracing::warn!(error_id = error_id, error = %msg, "Record not found");
            }
            AppError::Storage(e) => {
                tracing::error!(error_id = error_id, error = %e, "Storage failure");
            }
            AppError::Randomness(msg) => {
                tracing::error!(error_id = error_id, error = %msg, "Secure randomness failure");
            }
            AppError::Internal(msg) => {
                tracing::error!(error_id = error_id, error = %msg, "Internal error");
            }
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let error_id = uuid::Uuid::new_v4().to_string();
        self.log(&error_id);

        let (status, body) = self.response_parts(&error_id);
        HttpResponse::build(status).json(body)
    }

    fn status_code(&self) -> StatusCode {
        self.response_parts("").0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_on_protected_endpoints_map_to_401() {
        let err = AppError::Input(InputError::MissingAuthorization);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err = AppError::Input(InputError::MalformedAuthorization);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn credential_errors_map_to_401() {
        for e in [
            CredentialError::PasswordMismatch,
            CredentialError::SignatureInvalid,
            CredentialError::Expired,
            CredentialError::WrongIssuer("other".to_string()),
            CredentialError::MalformedSubject,
        ] {
            assert_eq!(
                AppError::Credential(e).status_code(),
                StatusCode::UNAUTHORIZED
            );
        }
    }

    #[test]
    fn randomness_failure_maps_to_500() {
        let err = AppError::Randomness("entropy pool exhausted".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn client_message_does_not_echo_storage_detail() {
        let err = AppError::Storage(StorageError::Query(
            "constraint users_email_key violated".to_string(),
        ));
        let (_, body) = err.response_parts("test-id");
        assert!(!body.message.contains("users_email_key"));
    }

    #[test]
    fn unknown_credential_lookup_maps_to_401() {
        let err = AppError::Storage(StorageError::NotFound("refresh token".to_string()));
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }
}
