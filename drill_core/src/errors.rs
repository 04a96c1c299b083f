//! # Error Types
//!
//! Structured error types for drill_core. Problem generation itself never
//! fails; these errors cover the edges where outside data enters the core:
//! parsing grades and enum names, validating settings, and reading or writing
//! the settings cache.
//!
//! ## Example
//!
//! ```rust
//! use drill_core::errors::{DrillError, DrillResult};
//!
//! fn validate_pages(pages: usize) -> DrillResult<()> {
//!     if pages > 50 {
//!         return Err(DrillError::invalid_input(
//!             "pages",
//!             pages.to_string(),
//!             "At most 50 pages can be printed at once",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_pages(60).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for drill_core operations
pub type DrillResult<T> = Result<T, DrillError>;

/// Structured error type for drill_core operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum DrillError {
    /// An input value is invalid (out of range, unknown name, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Settings cache version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DrillError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        DrillError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        DrillError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(
        path: impl Into<String>,
        locked_by: impl Into<String>,
        locked_at: impl Into<String>,
    ) -> Self {
        DrillError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create a SerializationError from any displayable source
    pub fn serialization(reason: impl std::fmt::Display) -> Self {
        DrillError::SerializationError {
            reason: reason.to_string(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DrillError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DrillError::InvalidInput { .. } => "INVALID_INPUT",
            DrillError::FileError { .. } => "FILE_ERROR",
            DrillError::FileLocked { .. } => "FILE_LOCKED",
            DrillError::SerializationError { .. } => "SERIALIZATION_ERROR",
            DrillError::VersionMismatch { .. } => "VERSION_MISMATCH",
            DrillError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
