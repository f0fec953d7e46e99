//! MySQL / MariaDB backend (networked SQL server)

use async_trait::async_trait;
use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlSslMode},
    pool::PoolConnection,
    MySql,
};
use std::str::FromStr;
use tracing::info;

use super::{impl_storage_connection, QUESTION_MARK};
use crate::db::{schema, Backend, BackendKind, DatabaseConfig, StorageConnection, StorageError};
use crate::models::ShayariFields;

/// Backend bound to a MySQL-compatible server
pub struct MySqlBackend {
    pool: MySqlPool,
}

impl MySqlBackend {
    /// Builds a lazy pool; no connection is opened until the first acquire
    pub fn new(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let mut options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| StorageError::Config(e.to_string()))?;

        if config.require_tls {
            options = options.ssl_mode(MySqlSslMode::Required);
        }

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect_lazy_with(options);

        Ok(Self { pool })
    }
}

#[async_trait]
impl Backend for MySqlBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::MySql
    }

    async fn acquire(&self) -> Result<Box<dyn StorageConnection>, StorageError> {
        let conn = self.pool.acquire().await.map_err(StorageError::Unavailable)?;
        Ok(Box::new(PooledMySql(conn)))
    }

    async fn ensure_schema(&self) -> Result<(), StorageError> {
        for statement in schema::MYSQL {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        info!(backend = "mysql", "Schema ensured");
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// One connection borrowed from the MySQL pool
pub struct PooledMySql(PoolConnection<MySql>);

impl PooledMySql {
    async fn insert_shayari(&mut self, fields: &ShayariFields) -> Result<i64, StorageError> {
        let result = sqlx::query(QUESTION_MARK.insert)
            .bind(fields.title.as_str())
            .bind(fields.content.as_str())
            .bind(fields.category.as_str())
            .bind(fields.mood.as_str())
            .bind(fields.is_published)
            .execute(&mut *self.0)
            .await?;

        Ok(result.last_insert_id() as i64)
    }

    async fn insert_admin_row(
        &mut self,
        username: &str,
        password_hash: &str,
    ) -> Result<i64, StorageError> {
        let result = sqlx::query(QUESTION_MARK.insert_admin)
            .bind(username)
            .bind(password_hash)
            .execute(&mut *self.0)
            .await?;

        Ok(result.last_insert_id() as i64)
    }
}

impl_storage_connection!(PooledMySql, QUESTION_MARK);
