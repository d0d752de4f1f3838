//! HTTP server for the patientql GraphQL API.
//!
//! Wires configuration, storage bootstrap, tracing and the axum router
//! together. The binary in `main.rs` is a thin wrapper over [`ServerBuilder`].

pub mod bootstrap;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod server;

pub use bootstrap::connect_storage;
pub use config::{
    AppConfig, LoggingConfig, PostgresStorageConfig, ServerConfig, StorageBackend, StorageConfig,
};
pub use observability::init_tracing;
pub use server::{PatientqlServer, ServerBuilder, build_app};
