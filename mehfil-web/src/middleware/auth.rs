/// Admin authentication guard
///
/// Wraps admin-only routes. A request whose session has no logged-in admin
/// is redirected to the login page before any extractor of the wrapped
/// handler runs, so it never acquires a storage connection and never writes.
///
/// Handlers behind the guard can take [`CurrentAdmin`] to learn who is
/// logged in.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use mehfil_shared::models::AdminIdentity;

use super::session::Session;
use crate::error::AppError;

/// Where unauthenticated admin requests are sent
pub const LOGIN_PATH: &str = "/admin/login";

/// The admin who passed the guard
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub AdminIdentity);

/// Guard middleware for admin routes
pub async fn require_admin(session: Session, mut req: Request, next: Next) -> Response {
    match session.admin().await {
        Some(admin) => {
            req.extensions_mut().insert(CurrentAdmin(admin));
            next.run(req).await
        }
        None => {
            tracing::debug!(path = %req.uri().path(), "Unauthenticated admin request");
            Redirect::to(LOGIN_PATH).into_response()
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentAdmin>()
            .cloned()
            .ok_or_else(|| AppError::Internal("Route is not behind require_admin".to_string()))
    }
}
