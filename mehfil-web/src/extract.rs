/// Request extractors
///
/// - [`DbConn`]: the request's storage connection, or none when storage is unreachable
/// - [`ShayariId`]: a numeric `/:id` path segment; anything else is a 404

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use mehfil_shared::db::StorageConnection;
use std::convert::Infallible;

use crate::app::AppState;

/// The storage connection held for the rest of this request
///
/// Acquisition failure is logged and yields `DbConn(None)`; handlers degrade
/// to empty pages or redirects instead of failing. The connection returns to
/// its pool when the handler drops it.
pub struct DbConn(pub Option<Box<dyn StorageConnection>>);

#[async_trait]
impl FromRequestParts<AppState> for DbConn {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match state.backend.acquire().await {
            Ok(conn) => Ok(DbConn(Some(conn))),
            Err(err) => {
                tracing::warn!(
                    backend = %state.backend.kind(),
                    error = %err,
                    "Storage unavailable, serving degraded response"
                );
                Ok(DbConn(None))
            }
        }
    }
}

/// ID of a shayari taken from the route path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShayariId(pub i64);

#[async_trait]
impl FromRequestParts<AppState> for ShayariId {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        raw.parse::<i64>()
            .map(ShayariId)
            .map_err(|_| state.views.not_found("Shayari not found."))
    }
}
