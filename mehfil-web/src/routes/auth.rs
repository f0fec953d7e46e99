/// Admin login and logout
///
/// # Login
///
/// A login succeeds only if an admin with the submitted username exists and
/// the password verifies against the stored Argon2 hash. Every failure
/// (unknown user, wrong password, unreadable hash, storage unavailable)
/// renders the same form with the same message, so the page never reveals
/// which usernames exist.
///
/// On success the previous session is discarded and a new one, holding only
/// the admin's ID and username, is issued under a fresh cookie.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use mehfil_shared::{
    auth::{password::verify_password, session::Flash},
    models::AdminUser,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    app::AppState,
    error::AppResult,
    extract::DbConn,
    middleware::{auth::LOGIN_PATH, session::Session},
    views::PageMeta,
};

/// Shown for every failed login
pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";

/// Login form fields
///
/// Missing fields are treated as empty and fail like any other bad login.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

/// `GET /admin/login`
pub async fn login_form(State(state): State<AppState>, session: Session) -> AppResult<Response> {
    let meta = PageMeta::new("Admin login").flashes(session.take_flashes().await);
    Ok(state.views.render("login", meta, Value::Null)?.into_response())
}

/// `POST /admin/login`
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    DbConn(conn): DbConn,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let admin = match conn {
        Some(mut conn) => match conn.find_admin_by_username(&form.username).await {
            Ok(admin) => admin,
            Err(err) => {
                tracing::warn!(error = %err, "Admin lookup failed");
                None
            }
        },
        None => None,
    };

    match admin.filter(|admin| password_matches(admin, &form.password)) {
        Some(admin) => {
            let identity = admin.identity();

            tracing::info!(admin_id = identity.id, username = %identity.username, "Admin logged in");

            session.regenerate().await;
            session.update(|data| data.admin = Some(identity)).await;

            Ok(Redirect::to("/admin/dashboard").into_response())
        }
        None => {
            tracing::info!(username = %form.username, "Failed admin login");

            let meta = PageMeta::new("Admin login")
                .flashes(session.take_flashes().await)
                .flash(Flash::error(INVALID_CREDENTIALS));

            Ok(state.views.render("login", meta, Value::Null)?.into_response())
        }
    }
}

fn password_matches(admin: &AdminUser, password: &str) -> bool {
    match verify_password(password, &admin.password_hash) {
        Ok(matches) => matches,
        Err(err) => {
            tracing::warn!(admin_id = admin.id, error = %err, "Stored password hash is unusable");
            false
        }
    }
}

/// `GET /admin/logout`
pub async fn logout(session: Session) -> Redirect {
    session
        .update(|data| {
            if let Some(admin) = data.admin.take() {
                tracing::info!(admin_id = admin.id, username = %admin.username, "Admin logged out");
            }
            data.clear();
            data.flashes.push(Flash::success("You have been logged out safely."));
        })
        .await;

    Redirect::to(LOGIN_PATH)
}
