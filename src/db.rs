use std::time::Duration;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, Executor, PgPool};
use thiserror::Error;
use tracing::{error, info};

use crate::config::DatabaseConfig;

const SCHEMA: &str = include_str!("schema.sql");

/// Errors surfaced by every data access operation.
#[derive(Debug, Error)]
pub enum RepoError {
    /// Unique constraint violated (duplicate username or favorite pair).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Foreign key points at a user or product that does not exist.
    #[error("missing reference: {0}")]
    MissingReference(String),

    /// The database could not be reached.
    #[error("database unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// Text the database refuses to store, such as a NUL byte.
    #[error("invalid text: {0}")]
    InvalidText(String),
}

/// SQLSTATE for `character_not_in_repertoire`.
const CHARACTER_NOT_IN_REPERTOIRE: &str = "22021";

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        if let sqlx::Error::Database(db_err) = &e {
            if db_err.code().as_deref() == Some(CHARACTER_NOT_IN_REPERTOIRE) {
                return Self::InvalidText(db_err.message().to_string());
            }
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            match db_err.kind() {
                ErrorKind::UniqueViolation => return Self::Conflict(constraint),
                ErrorKind::ForeignKeyViolation => return Self::MissingReference(constraint),
                _ => {}
            }
        }

        match e {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Self::Unavailable(e),
            other => Self::Database(other),
        }
    }
}

pub async fn create_pool(cfg: &DatabaseConfig) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .connect(&cfg.url)
        .await
        .context("connect to database")
}

/// Create the `users`, `products` and `favorites` tables if they are absent.
pub async fn initialize_schema(db: &PgPool) -> Result<(), RepoError> {
    // A bare &str runs over the simple query protocol, which accepts several statements.
    db.execute(SCHEMA).await.map_err(|e| {
        error!(error = %e, "schema bootstrap failed");
        RepoError::from(e)
    })?;
    info!("schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_are_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = RepoError::from(sqlx::Error::Io(io));
        assert!(matches!(err, RepoError::Unavailable(_)));
    }

    #[test]
    fn pool_timeouts_are_unavailable() {
        assert!(matches!(
            RepoError::from(sqlx::Error::PoolTimedOut),
            RepoError::Unavailable(_)
        ));
        assert!(matches!(
            RepoError::from(sqlx::Error::PoolClosed),
            RepoError::Unavailable(_)
        ));
    }

    #[test]
    fn row_not_found_is_a_plain_database_error() {
        assert!(matches!(
            RepoError::from(sqlx::Error::RowNotFound),
            RepoError::Database(_)
        ));
    }

    #[test]
    fn schema_declares_all_tables_without_storage_side_ids() {
        for table in ["users", "products", "favorites"] {
            assert!(SCHEMA.contains(&format!("CREATE TABLE IF NOT EXISTS {table}")));
        }
        assert!(SCHEMA.contains("unique_user_product"));
        assert!(!SCHEMA.contains("uuid_generate_v4"));
    }

    #[sqlx::test(migrations = false)]
    #[ignore = "needs a live Postgres via DATABASE_URL"]
    async fn schema_bootstrap_is_idempotent(pool: PgPool) -> sqlx::Result<()> {
        initialize_schema(&pool).await.expect("first run");
        initialize_schema(&pool).await.expect("second run");

        let tables: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT table_name::text
              FROM information_schema.tables
             WHERE table_schema = current_schema()
               AND table_name IN ('users', 'products', 'favorites')
             ORDER BY table_name
            "#,
        )
        .fetch_all(&pool)
        .await?;
        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        assert_eq!(names, ["favorites", "products", "users"]);
        Ok(())
    }
}
