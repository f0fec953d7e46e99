/// Health check endpoint
///
/// Reports whether the server can reach its storage backend.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "backend": "sqlite",
///   "database": "connected"
/// }
/// ```
///
/// `status` is `degraded` and `database` is `disconnected` when no
/// connection can be acquired or the ping fails. The response is `200`
/// either way; the public pages keep working in degraded mode.

use crate::{app::AppState, extract::DbConn};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Configured storage backend
    pub backend: String,

    /// Database status
    pub database: String,
}

/// Health check handler
pub async fn health_check(
    State(state): State<AppState>,
    DbConn(conn): DbConn,
) -> Json<HealthResponse> {
    let connected = match conn {
        Some(mut conn) => match conn.ping().await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "Health check ping failed");
                false
            }
        },
        None => false,
    };

    Json(HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.backend.kind().to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
    })
}
