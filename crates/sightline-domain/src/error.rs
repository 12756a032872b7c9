//! Domain error types for visibility operations.
//!
//! The error surface is deliberately narrow. Absent data (unknown user,
//! role with no children, unmatched permission entries) is never an error;
//! it degrades toward deny. Only failed collaborator calls surface here,
//! and they propagate to the caller unchanged.

use thiserror::Error;

/// Domain-specific errors for visibility operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A role/user directory call failed (connection, timeout, backend).
    #[error("directory lookup failed: {message}")]
    DirectoryUnavailable { message: String },

    /// A directory returned data the engine cannot interpret.
    #[error("directory returned malformed data: {message}")]
    InvalidDirectoryData { message: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
