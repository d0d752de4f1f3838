//! sqlx pool construction.

use sqlx_core::pool::PoolOptions;
use sqlx_postgres::{PgPool, Postgres};
use tracing::{debug, info, instrument};

use crate::config::PostgresConfig;
use crate::error::Result;

fn pool_options(config: &PostgresConfig) -> PoolOptions<Postgres> {
    let mut options = PoolOptions::<Postgres>::new()
        .max_connections(config.pool_size)
        .min_connections(1)
        .acquire_timeout(config.connect_timeout());

    if let Some(idle) = config.idle_timeout() {
        options = options.idle_timeout(idle);
    }
    options
}

/// Opens the pool and establishes the first connection, so a bad URL or an
/// unreachable server fails at startup.
#[instrument(skip(config), fields(url = %mask_password(&config.url)))]
pub async fn create_pool(config: &PostgresConfig) -> Result<PgPool> {
    config.validate()?;

    info!(
        pool_size = config.pool_size,
        connect_timeout_ms = config.connect_timeout_ms,
        "Opening PostgreSQL pool"
    );
    let pool = pool_options(config).connect(&config.url).await?;
    debug!(size = pool.size(), "PostgreSQL pool open");

    Ok(pool)
}

/// Replaces the password in `url` with `****` for logging.
///
/// The user info ends at the last `@`, so a password with a raw `@` is
/// still fully masked.
pub fn mask_password(url: &str) -> String {
    let authority_start = url.find("://").map_or(0, |p| p + 3);
    let rest = &url[authority_start..];
    let Some(at) = rest.rfind('@') else {
        return url.to_string();
    };
    match rest[..at].find(':') {
        Some(colon) => format!(
            "{}:****{}",
            &url[..authority_start + colon],
            &rest[at..]
        ),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PostgresError;

    #[test]
    fn test_mask_password() {
        assert_eq!(
            mask_password("postgres://clinic:hunter2@db:5432/patients"),
            "postgres://clinic:****@db:5432/patients"
        );
        assert_eq!(mask_password("postgres://db/patients"), "postgres://db/patients");
        assert_eq!(
            mask_password("postgres://clinic@db/patients"),
            "postgres://clinic@db/patients"
        );
        assert_eq!(
            mask_password("postgres://clinic:p@ss/w@rd@db/patients"),
            "postgres://clinic:****@db/patients"
        );
    }

    #[test]
    fn test_pool_options_use_config_limits() {
        let options = pool_options(&PostgresConfig::default().with_pool_size(7));
        assert_eq!(options.get_max_connections(), 7);
        assert_eq!(options.get_min_connections(), 1);
    }

    #[tokio::test]
    async fn test_zero_pool_size_is_rejected() {
        let config = PostgresConfig::new("postgres://localhost/db").with_pool_size(0);
        let err = create_pool(&config).await.unwrap_err();
        assert!(matches!(err, PostgresError::Config { .. }));
    }
}
