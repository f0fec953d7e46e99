/// Public pages
///
/// Only published shayari are ever visible here. When storage is
/// unreachable the listing renders empty and every detail page is a 404.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use serde_json::json;

use crate::{
    app::AppState,
    error::AppResult,
    extract::{DbConn, ShayariId},
    views::PageMeta,
};

/// `GET /` - published shayari, newest first
pub async fn index(
    State(state): State<AppState>,
    DbConn(conn): DbConn,
) -> AppResult<Html<String>> {
    let shayari_list = match conn {
        Some(mut conn) => conn.list_published().await?,
        None => Vec::new(),
    };

    state.views.render(
        "index",
        PageMeta::new("Mehfil-e-Shayari"),
        json!({ "shayari_list": shayari_list }),
    )
}

/// `GET /shayari/:id` - one published shayari
pub async fn detail(
    State(state): State<AppState>,
    ShayariId(id): ShayariId,
    DbConn(conn): DbConn,
) -> AppResult<Response> {
    let shayari = match conn {
        Some(mut conn) => conn.find_published(id).await?,
        None => None,
    };

    match shayari {
        Some(shayari) => {
            let meta = PageMeta::new(shayari.title.clone());
            let html = state
                .views
                .render("detail", meta, json!({ "shayari": shayari }))?;
            Ok(html.into_response())
        }
        None => Ok(state.views.not_found("Shayari not found.")),
    }
}
