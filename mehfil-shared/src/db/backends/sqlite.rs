//! SQLite backend (embedded file database)

use async_trait::async_trait;
use sqlx::{
    pool::PoolConnection,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Sqlite,
};
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::{debug, info};

use super::{impl_storage_connection, QUESTION_MARK};
use crate::db::{schema, Backend, BackendKind, DatabaseConfig, StorageConnection, StorageError};
use crate::models::ShayariFields;

/// Backend bound to a local SQLite file
pub struct SqliteBackend {
    pool: SqlitePool,
}

impl SqliteBackend {
    /// Builds a lazy pool over the database file, creating the file and its
    /// parent directory if they are missing
    pub fn new(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| StorageError::Config(e.to_string()))?
            .create_if_missing(true);

        if let Some(path) = database_path(&config.url) {
            ensure_parent_dir(&path)?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect_lazy_with(options);

        Ok(Self { pool })
    }
}

/// The on-disk file a SQLite URL points at, or `None` for in-memory databases
fn database_path(url: &str) -> Option<PathBuf> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();

    if path.is_empty() || path == ":memory:" || path.starts_with("file::memory:") {
        return None;
    }

    Some(PathBuf::from(path))
}

fn ensure_parent_dir(path: &Path) -> Result<(), StorageError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            debug!(directory = %parent.display(), "Creating database directory");
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Config(format!(
                    "cannot create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })
        }
        _ => Ok(()),
    }
}

#[async_trait]
impl Backend for SqliteBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Sqlite
    }

    async fn acquire(&self) -> Result<Box<dyn StorageConnection>, StorageError> {
        let conn = self.pool.acquire().await.map_err(StorageError::Unavailable)?;
        Ok(Box::new(PooledSqlite(conn)))
    }

    async fn ensure_schema(&self) -> Result<(), StorageError> {
        for statement in schema::SQLITE {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        info!(backend = "sqlite", "Schema ensured");
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// One connection borrowed from the SQLite pool
pub struct PooledSqlite(PoolConnection<Sqlite>);

impl PooledSqlite {
    async fn insert_shayari(&mut self, fields: &ShayariFields) -> Result<i64, StorageError> {
        let result = sqlx::query(QUESTION_MARK.insert)
            .bind(fields.title.as_str())
            .bind(fields.content.as_str())
            .bind(fields.category.as_str())
            .bind(fields.mood.as_str())
            .bind(fields.is_published)
            .execute(&mut *self.0)
            .await?;

        Ok(result.last_insert_rowid())
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

        Ok(result.last_insert_rowid())
    }
}

impl_storage_connection!(PooledSqlite, QUESTION_MARK);
