//! Storage error types.

use thiserror::Error;

/// Storage-specific errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Record not found.
    #[error("record not found: {record_id}")]
    RecordNotFound { record_id: String },

    /// Record already exists.
    #[error("record already exists: {record_id}")]
    RecordAlreadyExists { record_id: String },

    /// Role not found.
    #[error("role not found: {role_id}")]
    RoleNotFound { role_id: String },

    /// User not found.
    #[error("user not found: {user_id}")]
    UserNotFound { user_id: String },

    /// A record document is not usable (e.g. not a JSON object).
    #[error("invalid document: {message}")]
    InvalidDocument { message: String },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
