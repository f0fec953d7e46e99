/// Storage layer for Mehfil
///
/// One storage interface, three interchangeable backends. Which backend runs
/// is decided by the scheme of the configured database URL and nothing else;
/// the repository code above this module never branches on it.
///
/// # Modules
///
/// - `pool`: Database configuration and pool construction
/// - `schema`: Idempotent table bootstrap per dialect
/// - `backends`: MySQL, SQLite and PostgreSQL implementations
///
/// # Connection lifecycle
///
/// A request calls [`Backend::acquire`] once and holds the returned
/// [`StorageConnection`] until it finishes. Dropping the handle returns the
/// connection to its pool, so release happens exactly once on every exit
/// path, including early returns and errors.
///
/// # Example
///
/// ```no_run
/// use mehfil_shared::db::{connect, DatabaseConfig};
/// use mehfil_shared::models::ShayariRepository;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = connect(&DatabaseConfig::from_env()?)?;
/// backend.ensure_schema().await?;
///
/// let mut conn = backend.acquire().await?;
/// let published = conn.list_published().await?;
/// println!("{} published shayari", published.len());
/// # Ok(())
/// # }
/// ```

pub mod backends;
pub mod pool;
pub mod schema;

pub use pool::DatabaseConfig;

use async_trait::async_trait;
use std::{fmt, sync::Arc};

use crate::models::{AdminRepository, ShayariRepository};

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A connection could not be acquired (backend unreachable, bad credentials, pool timeout)
    #[error("Storage unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    /// A statement failed on an acquired connection
    #[error("Query failed: {0}")]
    Query(#[from] sqlx::Error),

    /// The database configuration is unusable
    #[error("Invalid database configuration: {0}")]
    Config(String),
}

/// The relational backend a deployment binds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Networked SQL server
    MySql,

    /// Embedded file database
    Sqlite,

    /// Managed cloud SQL service
    Postgres,
}

impl BackendKind {
    /// Determines the backend from a database URL scheme
    ///
    /// # Example
    ///
    /// ```
    /// use mehfil_shared::db::BackendKind;
    ///
    /// assert_eq!(BackendKind::from_url("mysql://root@localhost/mehfil").unwrap(), BackendKind::MySql);
    /// assert_eq!(BackendKind::from_url("sqlite://database/mehfil.db").unwrap(), BackendKind::Sqlite);
    /// assert!(BackendKind::from_url("redis://localhost").is_err());
    /// ```
    pub fn from_url(url: &str) -> Result<Self, StorageError> {
        let scheme = url.split(':').next().unwrap_or_default();

        match scheme.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(BackendKind::MySql),
            "sqlite" => Ok(BackendKind::Sqlite),
            "postgres" | "postgresql" => Ok(BackendKind::Postgres),
            other => Err(StorageError::Config(format!(
                "unsupported database scheme '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::MySql => write!(f, "mysql"),
            BackendKind::Sqlite => write!(f, "sqlite"),
            BackendKind::Postgres => write!(f, "postgres"),
        }
    }
}

/// One acquired storage connection
///
/// Carries every repository operation the application needs. Dropping the
/// box releases the connection.
#[async_trait]
pub trait StorageConnection: ShayariRepository + AdminRepository {
    /// Round-trips a trivial statement
    async fn ping(&mut self) -> Result<(), StorageError>;
}

/// A configured storage backend
#[async_trait]
pub trait Backend: Send + Sync {
    /// Which relational backend this is
    fn kind(&self) -> BackendKind;

    /// Acquires a connection for the duration of one request
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if no connection can be obtained.
    async fn acquire(&self) -> Result<Box<dyn StorageConnection>, StorageError>;

    /// Creates the `shayari` and `admins` tables if they do not exist
    async fn ensure_schema(&self) -> Result<(), StorageError>;

    /// Closes every pooled connection
    async fn close(&self);
}

/// Builds the backend selected by `config.url`
///
/// Pools are created lazily: this never touches the network, so a process
/// can start while its database is still unreachable and degrade per request.
///
/// # Errors
///
/// Returns `StorageError::Config` for an unsupported scheme or a URL the
/// driver cannot parse.
pub fn connect(config: &DatabaseConfig) -> Result<Arc<dyn Backend>, StorageError> {
    let kind = BackendKind::from_url(&config.url)?;

    tracing::info!(
        backend = %kind,
        max_connections = config.max_connections,
        acquire_timeout_seconds = config.acquire_timeout_seconds,
        require_tls = config.require_tls,
        "Configuring storage backend"
    );

    let backend: Arc<dyn Backend> = match kind {
        BackendKind::MySql => Arc::new(backends::mysql::MySqlBackend::new(config)?),
        BackendKind::Sqlite => Arc::new(backends::sqlite::SqliteBackend::new(config)?),
        BackendKind::Postgres => Arc::new(backends::postgres::PostgresBackend::new(config)?),
    };

    Ok(backend)
}
