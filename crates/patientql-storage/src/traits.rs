//! The storage trait every backend implements.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::types::{NewPatient, NewPost, Patient, PatientChanges, Post, PostChanges};

/// Storage contract behind the GraphQL resolvers.
///
/// Each method maps to exactly one SQL statement on the relational backend.
/// Callers rely on that: resolving `posts { Patient { id } }` over N posts
/// costs `1 + N` calls, and nothing here batches or caches across calls.
///
/// Implementations must be thread-safe (`Send + Sync`); a single instance is
/// shared by all concurrent requests.
///
/// # Example
///
/// ```ignore
/// use patientql_storage::{EntityStorage, NewPatient, Patient, StorageError};
///
/// async fn register(storage: &dyn EntityStorage) -> Result<Patient, StorageError> {
///     let new = NewPatient::now("Ada", "ada@example.com");
///     let id = storage.create_patient(&new).await?;
///     Ok(Patient::created(id, &new))
/// }
/// ```
#[async_trait]
pub trait EntityStorage: Send + Sync {
    // ==================== Patients ====================

    /// `SELECT ... FROM patient WHERE id = $1`.
    ///
    /// Returns `None` when no row matches.
    async fn get_patient(&self, id: i32) -> Result<Option<Patient>, StorageError>;

    /// `SELECT ... FROM patient`, in ascending id order.
    async fn list_patients(&self) -> Result<Vec<Patient>, StorageError>;

    /// `INSERT INTO patient ... RETURNING id`.
    ///
    /// Returns the generated id.
    async fn create_patient(&self, patient: &NewPatient) -> Result<i32, StorageError>;

    /// `UPDATE patient SET name, email WHERE id = $3`.
    ///
    /// Returns the number of rows affected (0 or 1). `created_at` is untouched.
    async fn update_patient(&self, changes: &PatientChanges) -> Result<u64, StorageError>;

    /// `DELETE FROM patient WHERE id = $1`.
    ///
    /// Returns the number of rows affected. Deleting a missing id is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ForeignKeyViolation` while posts still
    /// reference the patient.
    async fn delete_patient(&self, id: i32) -> Result<u64, StorageError>;

    // ==================== Posts ====================

    /// `SELECT ... FROM posts WHERE id = $1`.
    ///
    /// Returns `None` when no row matches.
    async fn get_post(&self, id: i32) -> Result<Option<Post>, StorageError>;

    /// `SELECT ... FROM posts`, in ascending id order.
    async fn list_posts(&self) -> Result<Vec<Post>, StorageError>;

    /// `INSERT INTO posts ... RETURNING id`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ForeignKeyViolation` when `patient_id` does not
    /// reference an existing patient.
    async fn create_post(&self, post: &NewPost) -> Result<i32, StorageError>;

    /// `UPDATE posts SET title, content, patient_id WHERE id = $4`.
    ///
    /// Returns the number of rows affected (0 or 1).
    async fn update_post(&self, changes: &PostChanges) -> Result<u64, StorageError>;

    /// `DELETE FROM posts WHERE id = $1`.
    ///
    /// Returns the number of rows affected.
    async fn delete_post(&self, id: i32) -> Result<u64, StorageError>;

    // ==================== Metadata ====================

    /// Returns the name of this storage backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}
