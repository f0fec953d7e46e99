//! Concrete storage backends
//!
//! The three backends share every statement except how a freshly inserted
//! row reports its ID, and differ in placeholder syntax only (`?` versus
//! `$n`). [`impl_storage_connection!`] stamps out the shared repository code
//! for a pooled connection type; each backend supplies `insert_shayari` and
//! `insert_admin_row` itself.

pub mod mysql;
pub mod postgres;
pub mod sqlite;

/// SQL text for one placeholder dialect
pub(crate) struct Statements {
    pub list_published: &'static str,
    pub list_all: &'static str,
    pub find_published: &'static str,
    pub find: &'static str,
    pub insert: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
    pub find_admin: &'static str,
    pub insert_admin: &'static str,
}

/// `?` placeholders (MySQL, SQLite)
pub(crate) const QUESTION_MARK: Statements = Statements {
    list_published: "SELECT id, title, content, category, mood, is_published, created_at \
                     FROM shayari WHERE is_published = ? ORDER BY created_at DESC, id DESC",
    list_all: "SELECT id, title, content, category, mood, is_published, created_at \
               FROM shayari ORDER BY created_at DESC, id DESC",
    find_published: "SELECT id, title, content, category, mood, is_published, created_at \
                     FROM shayari WHERE id = ? AND is_published = ?",
    find: "SELECT id, title, content, category, mood, is_published, created_at \
           FROM shayari WHERE id = ?",
    insert: "INSERT INTO shayari (title, content, category, mood, is_published) \
             VALUES (?, ?, ?, ?, ?)",
    update: "UPDATE shayari SET title = ?, content = ?, category = ?, mood = ?, is_published = ? \
             WHERE id = ?",
    delete: "DELETE FROM shayari WHERE id = ?",
    find_admin: "SELECT id, username, password_hash FROM admins \
                 WHERE username = ? ORDER BY id LIMIT 1",
    insert_admin: "INSERT INTO admins (username, password_hash) VALUES (?, ?)",
};

/// `$n` placeholders (PostgreSQL)
pub(crate) const NUMBERED: Statements = Statements {
    list_published: "SELECT id, title, content, category, mood, is_published, created_at \
                     FROM shayari WHERE is_published = $1 ORDER BY created_at DESC, id DESC",
    list_all: "SELECT id, title, content, category, mood, is_published, created_at \
               FROM shayari ORDER BY created_at DESC, id DESC",
    find_published: "SELECT id, title, content, category, mood, is_published, created_at \
                     FROM shayari WHERE id = $1 AND is_published = $2",
    find: "SELECT id, title, content, category, mood, is_published, created_at \
           FROM shayari WHERE id = $1",
    insert: "INSERT INTO shayari (title, content, category, mood, is_published) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
    update: "UPDATE shayari SET title = $1, content = $2, category = $3, mood = $4, \
             is_published = $5 WHERE id = $6",
    delete: "DELETE FROM shayari WHERE id = $1",
    find_admin: "SELECT id, username, password_hash FROM admins \
                 WHERE username = $1 ORDER BY id LIMIT 1",
    insert_admin: "INSERT INTO admins (username, password_hash) VALUES ($1, $2) RETURNING id",
};

/// Implements `ShayariRepository`, `AdminRepository` and `StorageConnection`
/// for a newtype around `PoolConnection<DB>`.
///
/// The wrapped type must provide inherent `insert_shayari` and
/// `insert_admin_row` methods.
macro_rules! impl_storage_connection {
    ($conn:ty, $statements:ident) => {
        #[async_trait::async_trait]
        impl $crate::models::ShayariRepository for $conn {
            async fn list_published(
                &mut self,
            ) -> Result<Vec<$crate::models::Shayari>, $crate::db::StorageError> {
                let rows = sqlx::query_as::<_, $crate::models::Shayari>(
                    $statements.list_published,
                )
                .bind(true)
                .fetch_all(&mut *self.0)
                .await?;

                Ok(rows)
            }

            async fn list_all(
                &mut self,
            ) -> Result<Vec<$crate::models::Shayari>, $crate::db::StorageError> {
                let rows = sqlx::query_as::<_, $crate::models::Shayari>($statements.list_all)
                    .fetch_all(&mut *self.0)
                    .await?;

                Ok(rows)
            }

            async fn find_published(
                &mut self,
                id: i64,
            ) -> Result<Option<$crate::models::Shayari>, $crate::db::StorageError> {
                let row = sqlx::query_as::<_, $crate::models::Shayari>(
                    $statements.find_published,
                )
                .bind(id)
                .bind(true)
                .fetch_optional(&mut *self.0)
                .await?;

                Ok(row)
            }

            async fn find(
                &mut self,
                id: i64,
            ) -> Result<Option<$crate::models::Shayari>, $crate::db::StorageError> {
                let row = sqlx::query_as::<_, $crate::models::Shayari>($statements.find)
                    .bind(id)
                    .fetch_optional(&mut *self.0)
                    .await?;

                Ok(row)
            }

            async fn insert(
                &mut self,
                fields: &$crate::models::ShayariFields,
            ) -> Result<i64, $crate::db::StorageError> {
                self.insert_shayari(fields).await
            }

            async fn update(
                &mut self,
                id: i64,
                fields: &$crate::models::ShayariFields,
            ) -> Result<u64, $crate::db::StorageError> {
                let result = sqlx::query($statements.update)
                    .bind(fields.title.as_str())
                    .bind(fields.content.as_str())
                    .bind(fields.category.as_str())
                    .bind(fields.mood.as_str())
                    .bind(fields.is_published)
                    .bind(id)
                    .execute(&mut *self.0)
                    .await?;

                Ok(result.rows_affected())
            }

            async fn delete(&mut self, id: i64) -> Result<u64, $crate::db::StorageError> {
                let result = sqlx::query($statements.delete)
                    .bind(id)
                    .execute(&mut *self.0)
                    .await?;

                Ok(result.rows_affected())
            }
        }

        #[async_trait::async_trait]
        impl $crate::models::AdminRepository for $conn {
            async fn find_admin_by_username(
                &mut self,
                username: &str,
            ) -> Result<Option<$crate::models::AdminUser>, $crate::db::StorageError> {
                let admin = sqlx::query_as::<_, $crate::models::AdminUser>(
                    $statements.find_admin,
                )
                .bind(username)
                .fetch_optional(&mut *self.0)
                .await?;

                Ok(admin)
            }

            async fn insert_admin(
                &mut self,
                username: &str,
                password_hash: &str,
            ) -> Result<i64, $crate::db::StorageError> {
                self.insert_admin_row(username, password_hash).await
            }
        }

        #[async_trait::async_trait]
        impl $crate::db::StorageConnection for $conn {
            async fn ping(&mut self) -> Result<(), $crate::db::StorageError> {
                sqlx::query("SELECT 1").execute(&mut *self.0).await?;
                Ok(())
            }
        }
    };
}

pub(crate) use impl_storage_connection;
