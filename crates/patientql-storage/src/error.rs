//! Storage error types.
//!
//! Every backend reports failures through [`StorageError`]. A missing row on
//! a read is not an error: reads return `Ok(None)`.

use std::fmt;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The addressed row does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity name, e.g. "Patient".
        entity: &'static str,
        /// The id that was looked up.
        id: i32,
    },

    /// A foreign key constraint rejected the statement.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation {
        /// Description reported by the backend.
        message: String,
    },

    /// Any other integrity constraint (unique, not-null, check) failed.
    #[error("Constraint violation: {message}")]
    ConstraintViolation {
        /// Description reported by the backend.
        message: String,
    },

    /// The statement parameters were rejected by the backend.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of the invalid value.
        message: String,
    },

    /// Failed to reach the storage backend.
    #[error("Connection error: {message}")]
    ConnectionError {
        /// Description of the connection error.
        message: String,
    },

    /// An internal storage error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl StorageError {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }

    /// Creates a new `ForeignKeyViolation` error.
    #[must_use]
    pub fn foreign_key(message: impl Into<String>) -> Self {
        Self::ForeignKeyViolation {
            message: message.into(),
        }
    }

    /// Creates a new `ConstraintViolation` error.
    #[must_use]
    pub fn constraint(message: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidInput` error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a new `ConnectionError` error.
    #[must_use]
    pub fn connection_error(message: impl Into<String>) -> Self {
        Self::ConnectionError {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the error category for logging and client-facing error codes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::ForeignKeyViolation { .. } | Self::ConstraintViolation { .. } => {
                ErrorCategory::Conflict
            }
            Self::InvalidInput { .. } => ErrorCategory::Validation,
            Self::ConnectionError { .. } => ErrorCategory::Infrastructure,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Categories of storage errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Row not found.
    NotFound,
    /// Integrity constraint rejected the statement.
    Conflict,
    /// Bad statement parameters.
    Validation,
    /// Connection or pool failure.
    Infrastructure,
    /// Anything else.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::Conflict => write!(f, "conflict"),
            Self::Validation => write!(f, "validation"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Internal => write!(f, "internal"),
        }
    }
}
