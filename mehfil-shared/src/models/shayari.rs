/// Shayari model and repository contract
///
/// A shayari is one short poetic text. Public pages only ever see rows whose
/// publish flag is set; the admin area sees everything.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE shayari (
///     id           INTEGER PRIMARY KEY,      -- assigned by storage
///     title        TEXT NOT NULL,
///     content      TEXT NOT NULL,
///     category     TEXT NOT NULL,
///     mood         TEXT NOT NULL,
///     is_published BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at   TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
/// );
/// ```
///
/// The exact column types differ per backend; see `db::schema`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::StorageError;

/// A stored shayari
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Shayari {
    /// Storage-assigned ID, immutable after insert
    pub id: i64,

    pub title: String,

    pub content: String,

    /// Free-form classifier (e.g. "ishq", "dard")
    pub category: String,

    /// Free-form classifier (e.g. "sad", "hopeful")
    pub mood: String,

    /// Whether the shayari is visible on public pages
    pub is_published: bool,

    /// Set by storage at insert time, never updated
    pub created_at: DateTime<Utc>,
}

/// The editable fields of a shayari
///
/// Inserts take all five fields; updates overwrite all five, there is no
/// partial patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShayariFields {
    pub title: String,
    pub content: String,
    pub category: String,
    pub mood: String,
    pub is_published: bool,
}

impl From<&Shayari> for ShayariFields {
    fn from(shayari: &Shayari) -> Self {
        Self {
            title: shayari.title.clone(),
            content: shayari.content.clone(),
            category: shayari.category.clone(),
            mood: shayari.mood.clone(),
            is_published: shayari.is_published,
        }
    }
}

/// Shayari operations available on a storage connection
///
/// Every operation is a single statement; nothing here spans a transaction.
/// Both listings are ordered newest first (`created_at DESC, id DESC`).
#[async_trait]
pub trait ShayariRepository: Send {
    /// Lists published shayari, newest first
    async fn list_published(&mut self) -> Result<Vec<Shayari>, StorageError>;

    /// Lists every shayari regardless of publish state, newest first
    async fn list_all(&mut self) -> Result<Vec<Shayari>, StorageError>;

    /// Finds a shayari by ID only if it is published
    async fn find_published(&mut self, id: i64) -> Result<Option<Shayari>, StorageError>;

    /// Finds a shayari by ID regardless of publish state
    async fn find(&mut self, id: i64) -> Result<Option<Shayari>, StorageError>;

    /// Inserts a shayari and returns the storage-assigned ID
    async fn insert(&mut self, fields: &ShayariFields) -> Result<i64, StorageError>;

    /// Overwrites every editable field of a shayari
    ///
    /// Returns the number of rows affected. An unknown ID affects zero rows
    /// and is not an error.
    async fn update(&mut self, id: i64, fields: &ShayariFields) -> Result<u64, StorageError>;

    /// Hard-deletes a shayari
    ///
    /// Returns the number of rows affected. An unknown ID affects zero rows
    /// and is not an error.
    async fn delete(&mut self, id: i64) -> Result<u64, StorageError>;
}
