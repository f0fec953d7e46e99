/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`session`]: Server-side session store with HMAC-signed cookie tokens
/// - [`provision`]: Out-of-band creation of admin accounts
///
/// # Example
///
/// ```
/// use mehfil_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("sukhan-fahm")?;
/// assert!(verify_password("sukhan-fahm", &hash)?);
/// # Ok(())
/// # }
/// ```

pub mod password;
pub mod provision;
pub mod session;
