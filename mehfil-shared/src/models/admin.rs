/// Admin user model and repository contract
///
/// Admin rows are created out-of-band by the provisioning CLI, never through
/// the web interface. Login looks an admin up by username and verifies the
/// submitted password against the stored Argon2id hash.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE admins (
///     id            INTEGER PRIMARY KEY,
///     username      VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL
/// );
/// ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::db::StorageError;

/// A stored admin account
///
/// Not `Serialize`, and `Debug` redacts the hash. Use [`AdminIdentity`] for
/// anything that leaves the login handler.
#[derive(Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AdminUser {
    pub id: i64,

    /// Sole lookup key at login
    pub username: String,

    /// Argon2id PHC string
    pub password_hash: String,
}

impl AdminUser {
    /// The session-safe view of this admin
    pub fn identity(&self) -> AdminIdentity {
        AdminIdentity {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

impl fmt::Debug for AdminUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminUser")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// What an authenticated session remembers about its admin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub id: i64,
    pub username: String,
}

/// Admin operations available on a storage connection
#[async_trait]
pub trait AdminRepository: Send {
    /// Finds an admin by username
    ///
    /// Usernames are assumed unique; if storage holds duplicates the first
    /// row by ID wins.
    async fn find_admin_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<AdminUser>, StorageError>;

    /// Inserts an admin row and returns its ID
    ///
    /// `password_hash` must already be hashed; see `auth::password`.
    async fn insert_admin(&mut self, username: &str, password_hash: &str)
        -> Result<i64, StorageError>;
}
