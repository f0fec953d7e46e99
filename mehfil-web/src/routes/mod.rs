/// Route handlers
///
/// - `public`: Published listing and detail pages
/// - `auth`: Admin login and logout
/// - `admin`: Dashboard and shayari management
/// - `health`: Health check endpoint

pub mod admin;
pub mod auth;
pub mod health;
pub mod public;

use axum::{extract::State, response::Response};

use crate::app::AppState;

/// Fallback for unknown paths
pub async fn not_found(State(state): State<AppState>) -> Response {
    state.views.not_found("The page you are looking for does not exist.")
}
