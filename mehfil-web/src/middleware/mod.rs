/// Middleware for the web server
///
/// - `session`: Signed session cookie handling
/// - `auth`: Admin guard for the `/admin` area
/// - `security`: Security headers

pub mod auth;
pub mod security;
pub mod session;
