//! Domain errors

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not authenticated")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Password too short")]
    PasswordTooShort,

    #[error("Password too long")]
    PasswordTooLong,

    #[error("Password too weak")]
    PasswordTooWeak,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Nothing to reorder")]
    EmptyReorderTarget,

    #[error("Unknown reorder id: {0}")]
    UnknownReorderId(Uuid),

    #[error("Invalid reorder transition: {0}")]
    InvalidReorderState(String),

    #[error("Malformed public menu row {index}: {reason}")]
    RowDecode { index: usize, reason: String },

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Validation failures are raised before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::ValidationError(_)
                | DomainError::PasswordTooShort
                | DomainError::PasswordTooLong
                | DomainError::PasswordTooWeak
                | DomainError::EmptyReorderTarget
                | DomainError::UnknownReorderId(_)
        )
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}

impl From<menuqr_security::PasswordError> for DomainError {
    fn from(error: menuqr_security::PasswordError) -> Self {
        match error {
            menuqr_security::PasswordError::TooShort => DomainError::PasswordTooShort,
            menuqr_security::PasswordError::TooLong => DomainError::PasswordTooLong,
            menuqr_security::PasswordError::TooWeak => DomainError::PasswordTooWeak,
        }
    }
}
