//! # Mehfil-e-Shayari Web Server
//!
//! Serves the public shayari pages and the admin area.
//!
//! ## Usage
//!
//! ```bash
//! SECRET_KEY=$(openssl rand -hex 32) cargo run -p mehfil-web
//! ```
//!
//! The storage backend follows `DATABASE_URL` (`mysql://`, `sqlite://` or
//! `postgres://`). Admin accounts are created with `mehfil-admin`.

use mehfil_shared::db::connect;
use mehfil_web::{
    app::{build_router, AppState},
    config::Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mehfil_web=debug,mehfil_shared=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Mehfil-e-Shayari v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    let backend = connect(&config.database)?;

    if config.database.auto_schema {
        // A failure here is not fatal; requests degrade until storage is reachable
        match backend.ensure_schema().await {
            Ok(()) => tracing::info!("Schema ready"),
            Err(err) => tracing::warn!(error = %err, "Could not ensure schema at startup"),
        }
    }

    let bind_address = config.bind_address();
    let state = AppState::new(backend.clone(), config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    backend.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received, draining connections...");
}
