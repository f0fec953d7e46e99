/// Configuration management for the web server
///
/// Loads configuration from environment variables into typed structs.
///
/// # Environment Variables
///
/// - `HOST`: Host to bind to (default: 0.0.0.0)
/// - `PORT`: Port to bind to (default: 5000)
/// - `PRODUCTION`: Serve behind HTTPS; enables HSTS and `Secure` cookies (default: false)
/// - `SECRET_KEY`: Key signing session cookies (required, at least 32 characters)
/// - `SESSION_TTL_SECONDS`: Idle time before a session expires (default: 86400)
/// - `DATABASE_*`: See [`mehfil_shared::db::pool`]
/// - `RUST_LOG`: Log filter (default: mehfil_web=debug,tower_http=debug)
///
/// # Example
///
/// ```no_run
/// use mehfil_web::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use mehfil_shared::db::{
    pool::{parse_flag, parse_or},
    DatabaseConfig,
};
use std::{env, fmt, time::Duration};

/// Minimum accepted length of `SECRET_KEY`
pub const MIN_SECRET_LENGTH: usize = 32;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Storage configuration
    pub database: DatabaseConfig,

    /// Session configuration
    pub session: SessionConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Production mode (HSTS, `Secure` cookies)
    pub production: bool,
}

/// Session configuration
#[derive(Clone)]
pub struct SessionConfig {
    /// Key for signing session cookies
    ///
    /// Generate with: `openssl rand -hex 32`
    pub secret: String,

    /// Idle lifetime of a session
    pub ttl_seconds: u64,
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"<redacted>")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `SECRET_KEY` is missing or shorter than 32 characters
    /// - A variable is present but has an invalid value
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "PORT", 5000u16)?;
        let production = parse_flag(&lookup, "PRODUCTION", false)?;

        let secret = lookup("SECRET_KEY")
            .ok_or_else(|| anyhow::anyhow!("SECRET_KEY environment variable is required"))?;

        if secret.len() < MIN_SECRET_LENGTH {
            anyhow::bail!(
                "SECRET_KEY must be at least {} characters long",
                MIN_SECRET_LENGTH
            );
        }

        let ttl_seconds = parse_or(&lookup, "SESSION_TTL_SECONDS", 86_400u64)?;
        if ttl_seconds == 0 {
            anyhow::bail!("SESSION_TTL_SECONDS must be greater than zero");
        }

        Ok(Self {
            server: ServerConfig {
                host,
                port,
                production,
            },
            database: DatabaseConfig::from_lookup(&lookup)?,
            session: SessionConfig {
                secret,
                ttl_seconds,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
