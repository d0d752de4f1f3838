//! Error types for GraphQL operations.
//!
//! Errors raised inside resolvers become field-level GraphQL errors carrying
//! `extensions.code` (and `extensions.category` for storage faults). Errors
//! raised before execution are rendered by the HTTP handler with the status
//! code from [`GraphQLError::status_code`].

use std::fmt;

use async_graphql::ErrorExtensions;
use patientql_storage::{ErrorCategory, StorageError};

/// Errors that can occur during GraphQL operations.
#[derive(Debug)]
pub enum GraphQLError {
    /// The request could not be turned into a GraphQL operation.
    InvalidQuery(String),

    /// The operation is not allowed over this HTTP method.
    MethodNotAllowed(String),

    /// A mutation addressed a row that does not exist.
    NotFound {
        /// Entity name, e.g. "Patient".
        entity: String,
        /// The id that was addressed.
        id: i32,
    },

    /// Storage error.
    Storage {
        /// Category reported by the storage layer.
        category: ErrorCategory,
        /// Storage error message.
        message: String,
    },

    /// Argument validation error.
    Validation(String),

    /// Internal server error.
    Internal(String),
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidQuery(msg) => write!(f, "Invalid GraphQL query: {msg}"),
            Self::MethodNotAllowed(msg) => write!(f, "Method not allowed: {msg}"),
            Self::NotFound { entity, id } => write!(f, "{entity} {id} not found"),
            Self::Storage { message, .. } => write!(f, "Storage error: {message}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for GraphQLError {}

impl GraphQLError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidQuery(_) | Self::Validation(_) => 400,
            Self::NotFound { .. } => 404,
            Self::MethodNotAllowed(_) => 405,
            Self::Storage {
                category: ErrorCategory::Conflict,
                ..
            } => 409,
            Self::Storage {
                category: ErrorCategory::Infrastructure,
                ..
            } => 503,
            Self::Storage { .. } | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for GraphQL error extensions.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidQuery(_) => "INVALID_QUERY",
            Self::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Storage {
                category: ErrorCategory::Conflict,
                ..
            } => "CONFLICT",
            Self::Storage { .. } => "STORAGE_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the storage category, if this error came from storage.
    #[must_use]
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            Self::NotFound { .. } => Some(ErrorCategory::NotFound),
            Self::Storage { category, .. } => Some(*category),
            _ => None,
        }
    }

    /// Converts this error into an async-graphql field error with
    /// `code` and `category` extensions.
    #[must_use]
    pub fn into_server_error(self) -> async_graphql::Error {
        self.extend()
    }
}

impl ErrorExtensions for GraphQLError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.error_code();
        let category = self.category();
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", code);
            if let Some(category) = category {
                e.set("category", category.to_string());
            }
        })
    }
}

impl From<StorageError> for GraphQLError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity, id } => Self::NotFound {
                entity: entity.to_string(),
                id,
            },
            other => Self::Storage {
                category: other.category(),
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(GraphQLError::InvalidQuery("test".into()).status_code(), 400);
        assert_eq!(GraphQLError::validation("test").status_code(), 400);
        assert_eq!(
            GraphQLError::NotFound {
                entity: "Patient".into(),
                id: 1
            }
            .status_code(),
            404
        );
        assert_eq!(
            GraphQLError::from(StorageError::foreign_key("fk")).status_code(),
            409
        );
        assert_eq!(
            GraphQLError::from(StorageError::connection_error("down")).status_code(),
            503
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            GraphQLError::from(StorageError::not_found("Post", 3)).error_code(),
            "NOT_FOUND"
        );
        assert_eq!(
            GraphQLError::from(StorageError::constraint("unique")).error_code(),
            "CONFLICT"
        );
        assert_eq!(
            GraphQLError::from(StorageError::internal("boom")).error_code(),
            "STORAGE_ERROR"
        );
        assert_eq!(
            GraphQLError::validation("missing id").error_code(),
            "VALIDATION_ERROR"
        );
    }

    #[test]
    fn test_server_error_extensions() {
        let err = GraphQLError::from(StorageError::foreign_key("posts.patient_id 9"))
            .into_server_error();
        let extensions = err.extensions.expect("extensions set");

        assert_eq!(
            extensions.get("code"),
            Some(&async_graphql::Value::from("CONFLICT"))
        );
        assert_eq!(
            extensions.get("category"),
            Some(&async_graphql::Value::from("conflict"))
        );
    }

    #[test]
    fn test_validation_error_has_no_category() {
        let err = GraphQLError::validation("missing argument 'id'").into_server_error();
        let extensions = err.extensions.expect("extensions set");

        assert!(extensions.get("category").is_none());
        assert!(err.message.contains("missing argument 'id'"));
    }
}
