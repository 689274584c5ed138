//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresGateway`, a [`PersistenceGateway`] backed by a
//! `sqlx::PgPool`. Statements are prepared from their fixed text and every
//! value is bound positionally.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! dashboard-actions = { version = "0.1", features = ["postgres"] }
//! ```

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::DatabaseConfig;
use crate::core::error::StorageError;
use crate::core::service::PersistenceGateway;
use crate::core::statement::{InvoiceStatement, SqlParam};

const BACKEND: &str = "PostgreSQL";

/// Invoice gateway backed by PostgreSQL.
///
/// Writes to the `invoices` table created by the bundled migrations.
#[derive(Clone, Debug)]
pub struct PostgresGateway {
    pool: PgPool,
}

impl PostgresGateway {
    /// Create a new `PostgresGateway` with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool from configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(|e| StorageError::ConnectionError {
                backend: BACKEND.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self::new(pool))
    }

    /// Apply the bundled migrations (`migrations/`).
    pub async fn migrate(&self) -> Result<(), StorageError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| query_error(e.to_string()))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn query_error(message: String) -> StorageError {
    StorageError::QueryError {
        backend: BACKEND.to_string(),
        message,
    }
}

#[async_trait]
impl PersistenceGateway for PostgresGateway {
    async fn execute(&self, statement: InvoiceStatement) -> Result<u64, StorageError> {
        let mut query = sqlx::query(statement.sql());
        for param in statement.params() {
            query = match param {
                SqlParam::Text(value) => query.bind(value),
                SqlParam::Integer(value) => query.bind(value),
            };
        }

        let result = query.execute(&self.pool).await.map_err(|e| match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => StorageError::Unavailable {
                backend: BACKEND.to_string(),
            },
            other => query_error(other.to_string()),
        })?;

        Ok(result.rows_affected())
    }
}
