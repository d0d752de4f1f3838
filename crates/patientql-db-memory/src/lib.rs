//! In-memory storage backend for the patientql service.
//!
//! This crate provides an in-memory implementation of the `EntityStorage`
//! trait from `patientql-storage`, using papaya lock-free HashMaps. It keeps
//! the relational behavior the resolvers observe on PostgreSQL: serial ids,
//! id-ordered scans, the `posts.patient_id` foreign key, and row counts for
//! updates and deletes.
//!
//! # Example
//!
//! ```ignore
//! use patientql_db_memory::InMemoryStorage;
//! use patientql_storage::{EntityStorage, NewPatient};
//!
//! let storage = InMemoryStorage::new();
//! let id = storage.create_patient(&NewPatient::now("Ada", "ada@example.com")).await?;
//! ```

mod entity_impl;
pub mod storage;

pub use patientql_storage::{DynStorage, EntityStorage, StorageError};
pub use storage::InMemoryStorage;

/// Creates a new shareable in-memory storage instance.
pub fn create_storage() -> DynStorage {
    std::sync::Arc::new(InMemoryStorage::new())
}
