/// Domain error type
///
/// Every façade operation returns `Result<T, BoardError>`. The variants map
/// one-to-one onto caller-visible outcomes; the API layer is the only place
/// that turns them into HTTP responses.
///
/// `NotFound` and `Forbidden` are separate variants. Ownership
/// checks fetch first and authorize second, so a missing entity (or a missing
/// parent) is always reported as `NotFound` even when the caller would not
/// own it.

use crate::auth::{jwt::JwtError, password::PasswordError};
use crate::store::StoreError;

/// Result alias used across the service layer
pub type BoardResult<T> = Result<T, BoardError>;

/// Domain error
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// Referenced entity (or its required parent) does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Entity exists but the caller is not its (transitive) owner
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Uniqueness violation (email or username)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Structurally valid request that breaks a domain rule
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Missing, invalid or expired credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Storage or crypto failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BoardError {
    /// Short machine-readable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            BoardError::NotFound(_) => "not_found",
            BoardError::Forbidden(_) => "forbidden",
            BoardError::Conflict(_) => "conflict",
            BoardError::InvalidOperation(_) => "invalid_operation",
            BoardError::Unauthorized(_) => "unauthorized",
            BoardError::Internal(_) => "internal_error",
        }
    }
}

impl From<StoreError> for BoardError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(constraint) => {
                if constraint.contains("email") {
                    BoardError::Conflict("Email already registered".to_string())
                } else if constraint.contains("username") {
                    BoardError::Conflict("Username already taken".to_string())
                } else {
                    BoardError::Conflict(format!("Constraint violation: {}", constraint))
                }
            }
            StoreError::ForeignKeyViolation(constraint) => {
                BoardError::NotFound(format!("Referenced entity not found ({})", constraint))
            }
            other => BoardError::Internal(other.to_string()),
        }
    }
}

impl From<PasswordError> for BoardError {
    fn from(err: PasswordError) -> Self {
        BoardError::Internal(format!("Password operation failed: {}", err))
    }
}

impl From<JwtError> for BoardError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::CreateError(msg) => BoardError::Internal(msg),
            JwtError::Expired => BoardError::Unauthorized("Token expired".to_string()),
            _ => BoardError::Unauthorized("Could not validate credentials".to_string()),
        }
    }
}
