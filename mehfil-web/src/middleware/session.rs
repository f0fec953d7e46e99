/// Session cookie middleware
///
/// Resolves the signed session cookie into a [`Session`] handle stored in
/// request extensions, and sets the cookie on the way out when the request
/// started a new session.
///
/// The cookie is a browser-session cookie (no `Max-Age`); server-side idle
/// expiry is handled by [`SessionStore`].
///
/// # Example
///
/// ```no_run
/// use axum::response::Redirect;
/// use mehfil_shared::auth::session::Flash;
/// use mehfil_web::middleware::session::Session;
///
/// async fn handler(session: Session) -> Redirect {
///     session.flash(Flash::success("Saved")).await;
///     Redirect::to("/admin/dashboard")
/// }
/// ```

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{
        header::{COOKIE, SET_COOKIE},
        request::Parts,
        HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::Response,
};
use mehfil_shared::{
    auth::session::{Flash, SessionData, SessionStore},
    models::AdminIdentity,
};
use std::sync::{Arc, Mutex, PoisonError};

use crate::{app::AppState, error::AppError};

/// Name of the session cookie
pub const COOKIE_NAME: &str = "mehfil_session";

/// Per-request handle to the caller's session
///
/// Cloning is cheap; all clones refer to the same session.
#[derive(Clone)]
pub struct Session {
    store: SessionStore,
    state: Arc<Mutex<HandleState>>,
}

#[derive(Default)]
struct HandleState {
    id: Option<String>,
    issued: bool,
}

impl Session {
    /// Wraps the session named by a verified cookie, if any
    pub fn new(store: SessionStore, id: Option<String>) -> Self {
        Self {
            store,
            state: Arc::new(Mutex::new(HandleState { id, issued: false })),
        }
    }

    fn current_id(&self) -> Option<String> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .id
            .clone()
    }

    fn ensure_id(&self) -> String {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        match &state.id {
            Some(id) => id.clone(),
            None => {
                let id = SessionStore::issue_id();
                state.id = Some(id.clone());
                state.issued = true;
                id
            }
        }
    }

    /// The ID that needs a fresh cookie, if this request started a session
    pub fn issued(&self) -> Option<String> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.id.clone().filter(|_| state.issued)
    }

    /// Drops the current session and continues under a fresh ID
    ///
    /// The old record is removed from the store, so tokens for it stop
    /// resolving, and the response carries a cookie for the new ID.
    pub async fn regenerate(&self) {
        let previous = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.issued = true;
            state.id.replace(SessionStore::issue_id())
        };

        if let Some(previous) = previous {
            self.store.remove(&previous).await;
        }
    }

    /// Snapshot of the session's data (empty if there is no live session)
    pub async fn data(&self) -> SessionData {
        match self.current_id() {
            Some(id) => self.store.load(&id).await.unwrap_or_default(),
            None => SessionData::default(),
        }
    }

    /// The logged-in admin, if any
    pub async fn admin(&self) -> Option<AdminIdentity> {
        self.data().await.admin
    }

    /// Mutates the session, starting one if needed
    pub async fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SessionData) -> R,
    {
        let id = self.ensure_id();
        self.store.update(&id, f).await
    }

    /// Queues a message for the next rendered page
    pub async fn flash(&self, flash: Flash) {
        self.update(|data| data.flashes.push(flash)).await;
    }

    /// Removes and returns pending flashes
    pub async fn take_flashes(&self) -> Vec<Flash> {
        match self.current_id() {
            Some(id) => self.store.take_flashes(&id).await,
            None => Vec::new(),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("Session layer is not installed".to_string()))
    }
}

/// Finds a cookie value by name across all `Cookie` headers
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// Builds the `Set-Cookie` value for a session token
pub fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!("{}={}; HttpOnly; SameSite=Lax; Path=/", COOKIE_NAME, token);
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Session middleware
///
/// Tokens that fail signature verification are ignored.
pub async fn session_layer(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let id = cookie_value(req.headers(), COOKIE_NAME).and_then(|token| state.sessions.verify(token));
    let session = Session::new(state.sessions.clone(), id);
    req.extensions_mut().insert(session.clone());

    let mut response = next.run(req).await;

    if let Some(id) = session.issued() {
        let pruned = state.sessions.prune_expired().await;
        if pruned > 0 {
            tracing::debug!(pruned, "Pruned expired sessions");
        }

        let cookie = session_cookie(&state.sessions.sign(&id), state.config.server.production);

        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(err) => tracing::warn!(error = %err, "Could not encode session cookie"),
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use mehfil_shared::auth::session::FlashLevel;
    use std::time::Duration;

    fn store() -> SessionStore {
        SessionStore::new(b"test-secret-key-at-least-32-bytes-long", Duration::from_secs(60))
    }

    #[test]
    fn test_cookie_value() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; mehfil_session=abc.def"));

        assert_eq!(cookie_value(&headers, COOKIE_NAME), Some("abc.def"));
        assert_eq!(cookie_value(&headers, "theme"), Some("dark"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn test_cookie_value_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(COOKIE, HeaderValue::from_static("mehfil_session=abc.def"));

        assert_eq!(cookie_value(&headers, COOKIE_NAME), Some("abc.def"));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc.def", false);
        assert_eq!(cookie, "mehfil_session=abc.def; HttpOnly; SameSite=Lax; Path=/");

        assert!(session_cookie("abc.def", true).ends_with("; Secure"));
    }

    #[tokio::test]
    async fn test_reading_does_not_start_a_session() {
        let session = Session::new(store(), None);

        assert!(session.admin().await.is_none());
        assert!(session.take_flashes().await.is_empty());
        assert!(session.issued().is_none());
    }

    #[tokio::test]
    async fn test_writing_starts_a_session_once() {
        let session = Session::new(store(), None);

        session.flash(Flash::success("one")).await;
        let first = session.issued().expect("session should be issued");
        session.flash(Flash::error("two")).await;
        assert_eq!(session.issued(), Some(first));

        let flashes = session.take_flashes().await;
        assert_eq!(flashes.len(), 2);
        assert_eq!(flashes[1].level, FlashLevel::Error);
        assert!(session.take_flashes().await.is_empty());
    }

    #[tokio::test]
    async fn test_regenerate_replaces_existing_session() {
        let store = store();
        let old_id = SessionStore::issue_id();
        store
            .update(&old_id, |data| data.flashes.push(Flash::error("stale")))
            .await;

        let session = Session::new(store.clone(), Some(old_id.clone()));
        session.regenerate().await;

        let new_id = session.issued().expect("a fresh session should be issued");
        assert_ne!(new_id, old_id);
        assert_eq!(store.load(&old_id).await, None);
        assert!(session.take_flashes().await.is_empty());
    }

    #[tokio::test]
    async fn test_existing_session_not_reissued() {
        let store = store();
        let id = SessionStore::issue_id();
        store.update(&id, |_| ()).await;

        let session = Session::new(store, Some(id));
        session.flash(Flash::success("saved")).await;

        assert!(session.issued().is_none());
    }
}
