/// Admin dashboard and shayari management
///
/// Every handler here sits behind `require_admin`. Mutations happen only in
/// POST handlers and always end in a redirect to the dashboard with a flash
/// message.
///
/// # Degraded storage
///
/// | Route                 | Storage unavailable                      |
/// |-----------------------|------------------------------------------|
/// | GET dashboard         | empty list                               |
/// | POST add              | form re-rendered with an error flash     |
/// | GET edit              | redirect to dashboard                    |
/// | POST edit / delete    | redirect to dashboard, nothing written   |

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use mehfil_shared::{auth::session::Flash, models::ShayariFields};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{
    app::AppState,
    error::AppResult,
    extract::{DbConn, ShayariId},
    middleware::{auth::CurrentAdmin, session::Session},
    views::PageMeta,
};

const DASHBOARD_PATH: &str = "/admin/dashboard";

/// Add/edit form fields
///
/// The text fields must be present (they may be empty). The publish
/// checkbox counts as checked when it is present with a non-empty value.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ShayariForm {
    #[validate(required(message = "Title is required"))]
    pub title: Option<String>,

    #[validate(required(message = "Content is required"))]
    pub content: Option<String>,

    #[validate(required(message = "Category is required"))]
    pub category: Option<String>,

    #[validate(required(message = "Mood is required"))]
    pub mood: Option<String>,

    pub is_published: Option<String>,
}

impl ShayariForm {
    /// Validates the form and converts it into a full set of fields
    pub fn into_fields(self) -> AppResult<ShayariFields> {
        self.validate()?;

        Ok(ShayariFields {
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            mood: self.mood.unwrap_or_default(),
            is_published: self.is_published.is_some_and(|value| !value.is_empty()),
        })
    }
}

fn back_to_dashboard() -> Response {
    Redirect::to(DASHBOARD_PATH).into_response()
}

/// `GET /admin`
pub async fn admin_root() -> Redirect {
    Redirect::to(DASHBOARD_PATH)
}

/// `GET /admin/dashboard` - every shayari, published or not
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    session: Session,
    DbConn(conn): DbConn,
) -> AppResult<Response> {
    let shayari_list = match conn {
        Some(mut conn) => conn.list_all().await?,
        None => Vec::new(),
    };

    let meta = PageMeta::new("Dashboard")
        .admin(admin)
        .flashes(session.take_flashes().await);

    Ok(state
        .views
        .render("dashboard", meta, json!({ "shayari_list": shayari_list }))?
        .into_response())
}

/// `GET /admin/shayari/add`
pub async fn add_form(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    session: Session,
) -> AppResult<Response> {
    let meta = PageMeta::new("Add shayari")
        .admin(admin)
        .flashes(session.take_flashes().await);

    Ok(state
        .views
        .render("add", meta, json!({ "form": ShayariFields::default() }))?
        .into_response())
}

/// `POST /admin/shayari/add`
pub async fn add(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    session: Session,
    DbConn(conn): DbConn,
    Form(form): Form<ShayariForm>,
) -> AppResult<Response> {
    let fields = form.into_fields()?;

    let Some(mut conn) = conn else {
        let meta = PageMeta::new("Add shayari")
            .admin(admin)
            .flashes(session.take_flashes().await)
            .flash(Flash::error(
                "The database is unavailable right now. Your shayari was not saved.",
            ));

        return Ok(state
            .views
            .render("add", meta, json!({ "form": fields }))?
            .into_response());
    };

    let id = conn.insert(&fields).await?;
    tracing::info!(shayari_id = id, admin_id = admin.id, published = fields.is_published, "Shayari added");

    session.flash(Flash::success("Shayari added successfully.")).await;
    Ok(back_to_dashboard())
}

/// `GET /admin/shayari/edit/:id`
pub async fn edit_form(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    session: Session,
    ShayariId(id): ShayariId,
    DbConn(conn): DbConn,
) -> AppResult<Response> {
    let Some(mut conn) = conn else {
        return Ok(back_to_dashboard());
    };

    let Some(shayari) = conn.find(id).await? else {
        session.flash(Flash::error("Shayari not found.")).await;
        return Ok(back_to_dashboard());
    };

    let meta = PageMeta::new(format!("Edit: {}", shayari.title))
        .admin(admin)
        .flashes(session.take_flashes().await);

    Ok(state
        .views
        .render(
            "edit",
            meta,
            json!({ "shayari_id": shayari.id, "form": ShayariFields::from(&shayari) }),
        )?
        .into_response())
}

/// `POST /admin/shayari/edit/:id` - overwrites every editable field
///
/// An ID that matches no row is logged and otherwise reported like a
/// successful update.
pub async fn edit(
    CurrentAdmin(admin): CurrentAdmin,
    session: Session,
    ShayariId(id): ShayariId,
    DbConn(conn): DbConn,
    Form(form): Form<ShayariForm>,
) -> AppResult<Response> {
    let fields = form.into_fields()?;

    let Some(mut conn) = conn else {
        return Ok(back_to_dashboard());
    };

    let rows = conn.update(id, &fields).await?;
    if rows == 0 {
        tracing::warn!(shayari_id = id, admin_id = admin.id, "Update matched no shayari");
    } else {
        tracing::info!(shayari_id = id, admin_id = admin.id, published = fields.is_published, "Shayari updated");
    }

    session.flash(Flash::success("Shayari updated successfully.")).await;
    Ok(back_to_dashboard())
}

/// `POST /admin/shayari/delete/:id`
///
/// Deleting an ID that does not exist looks exactly like deleting one that does.
pub async fn delete(
    CurrentAdmin(admin): CurrentAdmin,
    session: Session,
    ShayariId(id): ShayariId,
    DbConn(conn): DbConn,
) -> AppResult<Response> {
    if let Some(mut conn) = conn {
        let rows = conn.delete(id).await?;
        tracing::info!(shayari_id = id, admin_id = admin.id, rows_affected = rows, "Shayari deleted");

        session.flash(Flash::success("Shayari deleted.")).await;
    }

    Ok(back_to_dashboard())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn complete() -> ShayariForm {
        ShayariForm {
            title: Some("Dil".to_string()),
            content: Some("Dil hi to hai".to_string()),
            category: Some("ishq".to_string()),
            mood: Some("sad".to_string()),
            is_published: None,
        }
    }

    #[test]
    fn test_missing_checkbox_is_unpublished() {
        let fields = complete().into_fields().unwrap();
        assert!(!fields.is_published);
        assert_eq!(fields.title, "Dil");
    }

    #[test]
    fn test_checkbox_value_rules() {
        let form = ShayariForm {
            is_published: Some("on".to_string()),
            ..complete()
        };
        assert!(form.into_fields().unwrap().is_published);

        let form = ShayariForm {
            is_published: Some(String::new()),
            ..complete()
        };
        assert!(!form.into_fields().unwrap().is_published);
    }

    #[test]
    fn test_empty_text_fields_are_allowed() {
        let form = ShayariForm {
            content: Some(String::new()),
            ..complete()
        };
        assert_eq!(form.into_fields().unwrap().content, "");
    }

    #[test]
    fn test_missing_fields_reported_per_field() {
        let form = ShayariForm {
            title: Some("Dil".to_string()),
            ..Default::default()
        };

        match form.into_fields() {
            Err(AppError::Validation(details)) => {
                let fields: Vec<&str> = details.iter().map(|d| d.field.as_str()).collect();
                assert_eq!(fields, vec!["category", "content", "mood"]);
                assert_eq!(details[1].message, "Content is required");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
