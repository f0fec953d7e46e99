//! PostgreSQL backend (managed cloud SQL service)

use async_trait::async_trait;
use sqlx::{
    pool::PoolConnection,
    postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode},
    Postgres,
};
use std::str::FromStr;
use tracing::info;

use super::{impl_storage_connection, NUMBERED};
use crate::db::{schema, Backend, BackendKind, DatabaseConfig, StorageConnection, StorageError};
use crate::models::ShayariFields;

/// Backend bound to a PostgreSQL service
pub struct PostgresBackend {
    pool: PgPool,
}

impl PostgresBackend {
    /// Builds a lazy pool; no connection is opened until the first acquire
    pub fn new(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let mut options = PgConnectOptions::from_str(&config.url)
            .map_err(|e| StorageError::Config(e.to_string()))?;

        if config.require_tls {
            options = options.ssl_mode(PgSslMode::Require);
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect_lazy_with(options);

        Ok(Self { pool })
    }
}

#[async_trait]
impl Backend for PostgresBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Postgres
    }

    async fn acquire(&self) -> Result<Box<dyn StorageConnection>, StorageError> {
        let conn = self.pool.acquire().await.map_err(StorageError::Unavailable)?;
        Ok(Box::new(PooledPostgres(conn)))
    }

    async fn ensure_schema(&self) -> Result<(), StorageError> {
        for statement in schema::POSTGRES {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        info!(backend = "postgres", "Schema ensured");
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// One connection borrowed from the PostgreSQL pool
pub struct PooledPostgres(PoolConnection<Postgres>);

impl PooledPostgres {
    async fn insert_shayari(&mut self, fields: &ShayariFields) -> Result<i64, StorageError> {
        let id = sqlx::query_scalar::<_, i64>(NUMBERED.insert)
            .bind(fields.title.as_str())
            .bind(fields.content.as_str())
            .bind(fields.category.as_str())
            .bind(fields.mood.as_str())
            .bind(fields.is_published)
            .fetch_one(&mut *self.0)
            .await?;

        Ok(id)
    }

    async fn insert_admin_row(
        &mut self,
        username: &str,
        password_hash: &str,
    ) -> Result<i64, StorageError> {
        let id = sqlx::query_scalar::<_, i64>(NUMBERED.insert_admin)
            .bind(username)
            .bind(password_hash)
            .fetch_one(&mut *self.0)
            .await?;

        Ok(id)
    }
}

impl_storage_connection!(PooledPostgres, NUMBERED);
