/// Data model for Mehfil
///
/// This module contains the two persisted record types and the repository
/// traits every storage backend implements.
///
/// # Models
///
/// - `shayari`: Poetic texts with a publish flag
/// - `admin`: Credentialed operators who manage shayari
///
/// # Example
///
/// ```no_run
/// use mehfil_shared::db::{connect, DatabaseConfig};
/// use mehfil_shared::models::{ShayariFields, ShayariRepository};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = connect(&DatabaseConfig::default())?;
/// let mut conn = backend.acquire().await?;
///
/// let id = conn
///     .insert(&ShayariFields {
///         title: "Dil".to_string(),
///         content: "Dil hi to hai na sang-o-khisht".to_string(),
///         category: "ishq".to_string(),
///         mood: "sad".to_string(),
///         is_published: false,
///     })
///     .await?;
///
/// let stored = conn.find(id).await?;
/// # Ok(())
/// # }
/// ```

pub mod admin;
pub mod shayari;

pub use admin::{AdminIdentity, AdminRepository, AdminUser};
pub use shayari::{Shayari, ShayariFields, ShayariRepository};
