/// Admin account provisioning
///
/// Admins are created out-of-band by the `mehfil-admin` CLI running against
/// the same storage as the web process. The web interface has no way to
/// create one.

use tracing::info;

use super::password::{hash_password, PasswordError};
use crate::db::StorageError;
use crate::models::{AdminIdentity, AdminRepository};

/// Error type for admin provisioning
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Password cannot be empty")]
    EmptyPassword,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Trims both values and rejects blank ones
///
/// `create_admin` applies this itself; callers can use it to fail before
/// opening a connection.
pub fn normalize_credentials<'a>(
    username: &'a str,
    password: &'a str,
) -> Result<(&'a str, &'a str), ProvisionError> {
    let username = username.trim();
    let password = password.trim();

    if username.is_empty() {
        return Err(ProvisionError::EmptyUsername);
    }

    if password.is_empty() {
        return Err(ProvisionError::EmptyPassword);
    }

    Ok((username, password))
}

/// Hashes `password` and stores a new admin row
///
/// Surrounding whitespace is stripped from both values before use.
///
/// # Errors
///
/// - `EmptyUsername` / `EmptyPassword` when a value is blank
/// - `Storage` when the insert fails, including a duplicate username
///
/// # Example
///
/// ```no_run
/// use mehfil_shared::auth::provision::create_admin;
/// use mehfil_shared::db::{connect, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = connect(&DatabaseConfig::from_env()?)?;
/// let mut conn = backend.acquire().await?;
///
/// let admin = create_admin(conn.as_mut(), "ghalib", "hazaron-khwahishen").await?;
/// println!("Created admin {}", admin.username);
/// # Ok(())
/// # }
/// ```
pub async fn create_admin<C>(
    conn: &mut C,
    username: &str,
    password: &str,
) -> Result<AdminIdentity, ProvisionError>
where
    C: AdminRepository + ?Sized,
{
    let (username, password) = normalize_credentials(username, password)?;

    let password_hash = hash_password(password)?;
    let id = conn.insert_admin(username, &password_hash).await?;

    info!(admin_id = id, username = %username, "Admin provisioned");

    Ok(AdminIdentity {
        id,
        username: username.to_string(),
    })
}
