//! PostgreSQL implementation of the EntityStorage trait.

use async_trait::async_trait;
use sqlx_postgres::PgPool;
use tracing::debug;

use patientql_storage::{
    EntityStorage, NewPatient, NewPost, Patient, PatientChanges, Post, PostChanges, StorageError,
};

use crate::config::PostgresConfig;
use crate::migrations;
use crate::pool;
use crate::queries::{patient, post};

/// PostgreSQL storage backend for patients and posts.
#[derive(Debug, Clone)]
pub struct PostgresStorage {
    pool: PgPool,
}

impl PostgresStorage {
    /// Creates a new `PostgresStorage` with the given configuration.
    ///
    /// This will:
    /// 1. Create a connection pool
    /// 2. Run migrations (if configured)
    ///
    /// # Errors
    ///
    /// Returns an error if the connection pool cannot be created
    /// or if migrations fail.
    pub async fn new(config: PostgresConfig) -> Result<Self, StorageError> {
        let pool = pool::create_pool(&config).await?;

        if config.run_migrations {
            migrations::run(&pool).await?;
        } else {
            debug!("Skipping migrations (run_migrations = false)");
        }

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl EntityStorage for PostgresStorage {
    async fn get_patient(&self, id: i32) -> Result<Option<Patient>, StorageError> {
        patient::fetch(&self.pool, id).await
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, StorageError> {
        patient::fetch_all(&self.pool).await
    }

    async fn create_patient(&self, new: &NewPatient) -> Result<i32, StorageError> {
        patient::insert(&self.pool, new).await
    }

    async fn update_patient(&self, changes: &PatientChanges) -> Result<u64, StorageError> {
        patient::update(&self.pool, changes).await
    }

    async fn delete_patient(&self, id: i32) -> Result<u64, StorageError> {
        patient::delete(&self.pool, id).await
    }

    async fn get_post(&self, id: i32) -> Result<Option<Post>, StorageError> {
        post::fetch(&self.pool, id).await
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StorageError> {
        post::fetch_all(&self.pool).await
    }

    async fn create_post(&self, new: &NewPost) -> Result<i32, StorageError> {
        post::insert(&self.pool, new).await
    }

    async fn update_post(&self, changes: &PostChanges) -> Result<u64, StorageError> {
        post::update(&self.pool, changes).await
    }

    async fn delete_post(&self, id: i32) -> Result<u64, StorageError> {
        post::delete(&self.pool, id).await
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
