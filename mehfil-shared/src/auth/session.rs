/// Server-side session store
///
/// Session state lives in process memory; the browser only ever holds an
/// opaque, signed token naming its record.
///
/// # Token Format
///
/// `<id>.<signature>` where
/// - `id`: 32 random base62 characters
/// - `signature`: hex HMAC-SHA256 of `id` under the configured secret
///
/// A token whose signature does not verify is treated as absent.
///
/// # Expiry
///
/// A record idle for longer than the configured TTL is dropped the next time
/// anything touches it. There is no background sweeper; callers run
/// `prune_expired` when they start a new session.
///
/// # Example
///
/// ```
/// use mehfil_shared::auth::session::{Flash, SessionStore};
/// use std::time::Duration;
///
/// # async fn example() {
/// let store = SessionStore::new(b"a-secret-that-is-long-enough-for-hmac", Duration::from_secs(3600));
///
/// let id = SessionStore::issue_id();
/// let token = store.sign(&id);
/// assert_eq!(store.verify(&token).as_deref(), Some(id.as_str()));
///
/// store.update(&id, |data| data.flashes.push(Flash::success("Saved"))).await;
/// assert_eq!(store.take_flashes(&id).await.len(), 1);
/// # }
/// ```

use hmac::{Hmac, Mac};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::{sync::RwLock, time::Instant};
use tracing::debug;

use crate::models::AdminIdentity;

/// Length of the random session ID (characters)
pub const SESSION_ID_LENGTH: usize = 32;

/// Severity of a flash message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

/// A one-shot message shown on the next rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }
}

/// Everything a session remembers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionData {
    /// Present once an admin has logged in
    pub admin: Option<AdminIdentity>,

    /// Pending flash messages, oldest first
    pub flashes: Vec<Flash>,
}

impl SessionData {
    pub fn is_authenticated(&self) -> bool {
        self.admin.is_some()
    }

    /// Forgets the admin and any pending flashes
    pub fn clear(&mut self) {
        self.admin = None;
        self.flashes.clear();
    }
}

struct SessionRecord {
    data: SessionData,
    last_seen: Instant,
}

/// Shared, cloneable handle to all live sessions
#[derive(Clone)]
pub struct SessionStore {
    records: Arc<RwLock<HashMap<String, SessionRecord>>>,
    mac: Hmac<Sha256>,
    ttl: Duration,
}

impl SessionStore {
    /// Creates an empty store signing tokens with `secret`
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mac = Hmac::<Sha256>::new_from_slice(secret).expect("HMAC can take key of any size");

        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            mac,
            ttl,
        }
    }

    /// Generates a fresh random session ID
    ///
    /// Uses base62 (A-Z, a-z, 0-9) so the ID is cookie-safe as is.
    pub fn issue_id() -> String {
        const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
        let mut rng = rand::thread_rng();

        (0..SESSION_ID_LENGTH)
            .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
            .collect()
    }

    /// Produces the cookie token for `id`
    pub fn sign(&self, id: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(id.as_bytes());

        format!("{}.{}", id, hex::encode(mac.finalize().into_bytes()))
    }

    /// Checks a cookie token and returns the session ID it names
    ///
    /// The signature comparison is constant-time.
    pub fn verify(&self, token: &str) -> Option<String> {
        let (id, signature) = token.split_once('.')?;

        if id.len() != SESSION_ID_LENGTH || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }

        let signature = hex::decode(signature).ok()?;

        let mut mac = self.mac.clone();
        mac.update(id.as_bytes());
        mac.verify_slice(&signature).ok()?;

        Some(id.to_string())
    }

    /// Returns a snapshot of a live session and marks it as seen
    ///
    /// Unknown and expired sessions yield `None`; expired ones are removed.
    pub async fn load(&self, id: &str) -> Option<SessionData> {
        let mut records = self.records.write().await;
        let now = Instant::now();

        match records.get_mut(id) {
            Some(record) if now.duration_since(record.last_seen) <= self.ttl => {
                record.last_seen = now;
                Some(record.data.clone())
            }
            Some(_) => {
                debug!("Session expired");
                records.remove(id);
                None
            }
            None => None,
        }
    }

    /// Mutates a session, creating it if it is unknown or expired
    pub async fn update<F, R>(&self, id: &str, f: F) -> R
    where
        F: FnOnce(&mut SessionData) -> R,
    {
        let mut records = self.records.write().await;
        let now = Instant::now();

        let record = records
            .entry(id.to_string())
            .or_insert_with(|| SessionRecord {
                data: SessionData::default(),
                last_seen: now,
            });
        if now.duration_since(record.last_seen) > self.ttl {
            record.data = SessionData::default();
        }
        record.last_seen = now;
        f(&mut record.data)
    }

    /// Removes and returns pending flashes without creating a session
    pub async fn take_flashes(&self, id: &str) -> Vec<Flash> {
        let mut records = self.records.write().await;

        match records.get_mut(id) {
            Some(record) if Instant::now().duration_since(record.last_seen) <= self.ttl => {
                std::mem::take(&mut record.data.flashes)
            }
            _ => Vec::new(),
        }
    }

    /// Whether a live record exists for `id`
    #[cfg(test)]
    pub async fn contains(&self, id: &str) -> bool {
        let records = self.records.read().await;

        records
            .get(id)
            .map(|record| Instant::now().duration_since(record.last_seen) <= self.ttl)
            .unwrap_or(false)
    }

    /// Drops a session entirely
    pub async fn remove(&self, id: &str) {
        self.records.write().await.remove(id);
    }

    /// Drops every expired record and returns how many were removed
    pub async fn prune_expired(&self) -> usize {
        let mut records = self.records.write().await;
        let now = Instant::now();
        let before = records.len();

        records.retain(|_, record| now.duration_since(record.last_seen) <= self.ttl);
        before - records.len()
    }

    /// Number of records held, including not-yet-pruned expired ones
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
