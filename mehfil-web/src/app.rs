/// Application state and router builder
///
/// This module defines the shared application state and builds the Axum
/// router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use mehfil_shared::db::connect;
/// use mehfil_web::{app::{build_router, AppState}, config::Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let backend = connect(&config.database)?;
/// let state = AppState::new(backend, config)?;
///
/// let app = build_router(state);
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    middleware::{auth::require_admin, security::SecurityHeadersLayer, session::session_layer},
    views::Views,
};
use axum::{
    routing::{get, post},
    Router,
};
use handlebars::TemplateError;
use mehfil_shared::{auth::session::SessionStore, db::Backend};
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// Cloned into every handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend chosen by `DATABASE_URL`
    pub backend: Arc<dyn Backend>,

    /// Server-side sessions
    pub sessions: SessionStore,

    /// Compiled page templates
    pub views: Arc<Views>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    ///
    /// # Errors
    ///
    /// Returns a `TemplateError` if an embedded template fails to compile.
    pub fn new(backend: Arc<dyn Backend>, config: Config) -> Result<Self, TemplateError> {
        let sessions = SessionStore::new(config.session.secret.as_bytes(), config.session.ttl());

        Ok(Self {
            backend,
            sessions,
            views: Arc::new(Views::new()?),
            config: Arc::new(config),
        })
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── GET  /                            # Published shayari
/// ├── GET  /shayari/:id                 # One published shayari
/// ├── GET  /health                      # Health check
/// └── /admin/
///     ├── GET|POST /login               # Login form / attempt
///     │   (everything below requires a logged-in admin)
///     ├── GET  /                        # -> /admin/dashboard
///     ├── GET  /logout
///     ├── GET  /dashboard               # All shayari
///     ├── GET|POST /shayari/add
///     ├── GET|POST /shayari/edit/:id
///     └── POST /shayari/delete/:id
/// ```
///
/// # Middleware Stack
///
/// Outermost first:
/// 1. Security headers
/// 2. Logging (tower-http TraceLayer)
/// 3. Session cookie
/// 4. Admin guard (admin routes only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let public_routes = Router::new()
        .route("/", get(routes::public::index))
        .route("/shayari/:id", get(routes::public::detail));

    let login_routes = Router::new().route(
        "/admin/login",
        get(routes::auth::login_form).post(routes::auth::login),
    );

    let admin_routes = Router::new()
        .route("/admin", get(routes::admin::admin_root))
        .route("/admin/logout", get(routes::auth::logout))
        .route("/admin/dashboard", get(routes::admin::dashboard))
        .route(
            "/admin/shayari/add",
            get(routes::admin::add_form).post(routes::admin::add),
        )
        .route(
            "/admin/shayari/edit/:id",
            get(routes::admin::edit_form).post(routes::admin::edit),
        )
        .route("/admin/shayari/delete/:id", post(routes::admin::delete))
        .route_layer(axum::middleware::from_fn(require_admin));

    Router::new()
        .merge(health_routes)
        .merge(public_routes)
        .merge(login_routes)
        .merge(admin_routes)
        .fallback(routes::not_found)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_layer,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SecurityHeadersLayer::new(state.config.server.production))
        .with_state(state)
}
