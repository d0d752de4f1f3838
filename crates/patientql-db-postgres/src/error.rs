//! Error types for the PostgreSQL storage backend.

use patientql_storage::StorageError;
use sqlx_core::error::Error as SqlxError;

/// PostgreSQL error code for foreign key violation (23503).
pub const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// PostgreSQL error code for unique violation (23505).
pub const PG_UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL error code for not-null violation (23502).
pub const PG_NOT_NULL_VIOLATION: &str = "23502";

/// PostgreSQL error code for check violation (23514).
pub const PG_CHECK_VIOLATION: &str = "23514";

/// PostgreSQL error code for numeric value out of range (22003).
pub const PG_NUMERIC_OUT_OF_RANGE: &str = "22003";

/// Checks if a sqlx error has a specific PostgreSQL error code.
pub fn has_pg_error_code(err: &SqlxError, code: &str) -> bool {
    if let SqlxError::Database(db_err) = err {
        db_err.code().as_deref() == Some(code)
    } else {
        false
    }
}

/// Classifies a sqlx error raised by a single statement into a
/// [`StorageError`].
///
/// `context` names the statement for the message, e.g. "insert post".
pub fn classify(err: SqlxError, context: &str) -> StorageError {
    let message = format!("{context}: {err}");

    if has_pg_error_code(&err, PG_FOREIGN_KEY_VIOLATION) {
        return StorageError::foreign_key(message);
    }
    if [PG_UNIQUE_VIOLATION, PG_NOT_NULL_VIOLATION, PG_CHECK_VIOLATION]
        .iter()
        .any(|code| has_pg_error_code(&err, code))
    {
        return StorageError::constraint(message);
    }
    if has_pg_error_code(&err, PG_NUMERIC_OUT_OF_RANGE) {
        return StorageError::invalid_input(message);
    }

    match err {
        SqlxError::Io(_) | SqlxError::Tls(_) | SqlxError::PoolTimedOut | SqlxError::PoolClosed => {
            StorageError::connection_error(message)
        }
        _ => StorageError::internal(message),
    }
}

/// Errors specific to the PostgreSQL storage backend.
#[derive(Debug, thiserror::Error)]
pub enum PostgresError {
    /// Database connection error.
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx_core::error::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(String),

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl PostgresError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<PostgresError> for StorageError {
    fn from(err: PostgresError) -> Self {
        match err {
            PostgresError::Connection(e) => StorageError::connection_error(e.to_string()),
            PostgresError::Migration(e) => StorageError::internal(format!("Migration error: {e}")),
            PostgresError::Config { message } => {
                StorageError::internal(format!("Configuration error: {message}"))
            }
        }
    }
}

/// Result type alias for PostgreSQL operations.
pub type Result<T> = std::result::Result<T, PostgresError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PostgresError::config("invalid URL");
        assert!(err.to_string().contains("Configuration error"));

        let err = PostgresError::Migration("checksum mismatch".into());
        assert!(err.to_string().contains("Migration error"));
    }

    #[test]
    fn test_conversion_to_storage_error() {
        let pg_err = PostgresError::config("test error");
        let storage_err: StorageError = pg_err.into();
        assert!(matches!(storage_err, StorageError::Internal { .. }));
    }

    #[test]
    fn test_classify_pool_timeout() {
        let err = classify(SqlxError::PoolTimedOut, "select patient");
        assert!(matches!(err, StorageError::ConnectionError { .. }));
        assert!(err.to_string().contains("select patient"));
    }

    #[test]
    fn test_classify_row_not_found_is_internal() {
        let err = classify(SqlxError::RowNotFound, "insert patient");
        assert!(matches!(err, StorageError::Internal { .. }));
    }
}
