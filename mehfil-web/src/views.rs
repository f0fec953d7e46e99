//! Page rendering
//!
//! Templates are compiled into the binary and registered once at startup.
//! Every page extends the `layout` partial and receives the layout fields
//! (`page_title`, `admin`, `flashes`) next to its own data.
//!
//! # Example
//!
//! ```
//! use mehfil_web::views::{PageMeta, Views};
//! use serde_json::json;
//!
//! # fn example() -> anyhow::Result<()> {
//! let views = Views::new()?;
//! let html = views.render("index", PageMeta::new("Mehfil-e-Shayari"), json!({ "shayari_list": [] }))?;
//! assert!(html.0.contains("Mehfil-e-Shayari"));
//! # Ok(())
//! # }
//! ```

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::DateTime;
use handlebars::{handlebars_helper, Handlebars, TemplateError};
use mehfil_shared::{auth::session::Flash, models::AdminIdentity};
use serde_json::{json, Map, Value};

use crate::error::AppResult;

const TEMPLATES: &[(&str, &str)] = &[
    ("index", include_str!("../templates/index.hbs")),
    ("detail", include_str!("../templates/detail.hbs")),
    ("not_found", include_str!("../templates/not_found.hbs")),
    ("login", include_str!("../templates/login.hbs")),
    ("dashboard", include_str!("../templates/dashboard.hbs")),
    ("add", include_str!("../templates/add.hbs")),
    ("edit", include_str!("../templates/edit.hbs")),
];

const PARTIALS: &[(&str, &str)] = &[("layout", include_str!("../templates/layout.hbs"))];

handlebars_helper!(format_date: |value: str| {
    DateTime::parse_from_rfc3339(value)
        .map(|date| date.format("%d %b %Y").to_string())
        .unwrap_or_else(|_| value.to_string())
});

/// Layout data shared by every page
#[derive(Debug, Clone, Default)]
pub struct PageMeta {
    pub title: String,
    pub admin: Option<AdminIdentity>,
    pub flashes: Vec<Flash>,
}

impl PageMeta {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn admin(mut self, admin: AdminIdentity) -> Self {
        self.admin = Some(admin);
        self
    }

    pub fn flashes(mut self, flashes: Vec<Flash>) -> Self {
        self.flashes.extend(flashes);
        self
    }

    pub fn flash(mut self, flash: Flash) -> Self {
        self.flashes.push(flash);
        self
    }
}

/// Registry of compiled page templates
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    /// Compiles every embedded template
    ///
    /// # Errors
    ///
    /// Returns a `TemplateError` if a template fails to parse.
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_helper("format_date", Box::new(format_date));

        for (name, source) in PARTIALS {
            registry.register_partial(name, *source)?;
        }

        for (name, source) in TEMPLATES {
            registry.register_template_string(name, *source)?;
        }

        Ok(Self { registry })
    }

    /// Renders `name` with the layout fields merged into `data`
    pub fn render(&self, name: &str, meta: PageMeta, data: Value) -> AppResult<Html<String>> {
        let mut context = match data {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };

        context.insert("page_title".to_string(), json!(meta.title));
        context.insert("admin".to_string(), json!(meta.admin));
        context.insert("flashes".to_string(), json!(meta.flashes));

        let html = self.registry.render(name, &Value::Object(context))?;
        Ok(Html(html))
    }

    /// The 404 page
    pub fn not_found(&self, message: &str) -> Response {
        match self.render(
            "not_found",
            PageMeta::new("Not found"),
            json!({ "message": message }),
        ) {
            Ok(html) => (StatusCode::NOT_FOUND, html).into_response(),
            Err(err) => err.into_response(),
        }
    }
}
