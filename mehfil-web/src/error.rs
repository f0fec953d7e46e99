/// Error handling for the web server
///
/// Handlers return `AppResult<T>`; an `AppError` renders as a small HTML
/// page with the matching status code. Internal details are logged, never
/// shown.
///
/// Storage being unreachable is not an error here: the [`DbConn`] extractor
/// turns it into an absent connection and handlers degrade instead.
///
/// [`DbConn`]: crate::extract::DbConn

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use handlebars::html_escape;
use mehfil_shared::db::StorageError;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::ValidationErrors;

/// Web result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Unified web error type
#[derive(Debug)]
pub enum AppError {

    /// Missing or invalid form fields (400)
    Validation(Vec<ValidationErrorDetail>),

    /// Internal server error (500)
    Internal(String),
}

/// Validation error detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Form field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, heading, details) = match self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "Please fill in every required field",
                errors
                    .into_iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect(),
            ),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong",
                    vec!["An internal error occurred".to_string()],
                )
            }
        };

        (status, Html(error_page(status, heading, &details))).into_response()
    }
}

fn error_page(status: StatusCode, heading: &str, details: &[String]) -> String {
    let items: String = details
        .iter()
        .map(|d| format!("<li>{}</li>", html_escape(d)))
        .collect();

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{code} | Mehfil-e-Shayari</title></head>\n\
         <body>\n<h1>{heading}</h1>\n<ul class=\"errors\">{items}</ul>\n<p><a href=\"/\">Back to Mehfil</a></p>\n</body>\n</html>\n",
        code = status.as_u16(),
        heading = html_escape(heading),
        items = items,
    )
}

/// Convert storage errors to web errors
impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Internal(format!("Storage error: {}", err))
    }
}

/// Convert template errors to web errors
impl From<handlebars::RenderError> for AppError {
    fn from(err: handlebars::RenderError) -> Self {
        AppError::Internal(format!("Template rendering failed: {}", err))
    }
}

/// Convert form validation failures to field-level details
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details: Vec<ValidationErrorDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();

        details.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::Validation(details)
    }
}
