//! Storage bootstrap.
//!
//! Creates the single storage handle shared by every request. A failure
//! here is fatal for the process: the server never starts listening
//! without a working backend.

use anyhow::Context;
use patientql_db_postgres::mask_password;
use patientql_storage::DynStorage;
use tracing::info;

use crate::config::{StorageBackend, StorageConfig};

/// Connects the configured storage backend.
///
/// For PostgreSQL this opens the pool eagerly and, when enabled, applies
/// the embedded migrations.
pub async fn connect_storage(cfg: &StorageConfig) -> anyhow::Result<DynStorage> {
    match cfg.backend {
        StorageBackend::Postgres => {
            let pg = cfg.postgres.to_postgres_config();
            let url = mask_password(&pg.url);
            info!(url = %url, run_migrations = pg.run_migrations, "Connecting to PostgreSQL");

            let storage = patientql_db_postgres::create_storage(pg)
                .await
                .with_context(|| format!("failed to initialize PostgreSQL storage at {url}"))?;

            info!("PostgreSQL storage ready");
            Ok(storage)
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on restart");
            Ok(patientql_db_memory::create_storage())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_connects() {
        let cfg = StorageConfig {
            backend: StorageBackend::Memory,
            ..Default::default()
        };
        let storage = connect_storage(&cfg).await.unwrap();
        assert_eq!(storage.backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_unreachable_postgres_fails() {
        let mut cfg = StorageConfig::default();
        cfg.postgres.url = Some("postgres://postgres@127.0.0.1:1/postgres".into());
        cfg.postgres.connect_timeout_ms = 500;
        let Err(err) = connect_storage(&cfg).await else {
            panic!("expected connection failure");
        };
        assert!(err.to_string().contains("PostgreSQL"));
    }
}
