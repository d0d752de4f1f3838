//! # patientql-storage
//!
//! Entity types and the storage abstraction for the patientql service.
//!
//! This crate defines the [`EntityStorage`] trait and the `Patient`/`Post`
//! entities it exchanges. It does not contain any implementations: those
//! live in `patientql-db-postgres` and `patientql-db-memory`.
//!
//! ## Example
//!
//! ```ignore
//! use patientql_storage::{DynStorage, StorageError};
//!
//! async fn count_posts(storage: &DynStorage) -> Result<usize, StorageError> {
//!     Ok(storage.list_posts().await?.len())
//! }
//! ```

mod error;
mod traits;
mod types;

pub use error::{ErrorCategory, StorageError};
pub use traits::EntityStorage;
pub use types::{
    NewPatient, NewPost, Patient, PatientChanges, Post, PostChanges, ZERO_TIMESTAMP,
};

/// Shared handle to a storage backend, injected into the GraphQL layer.
pub type DynStorage = std::sync::Arc<dyn EntityStorage>;
