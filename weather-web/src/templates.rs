//! Page templates.
//!
//! Templates are compiled into the binary and rendered with Tera. HTML
//! auto-escaping is on for every template, so user input (the `q` parameter)
//! and API-provided text are escaped on output.

use serde::Serialize;
use std::sync::Arc;
use tera::{Context, Tera};
use thiserror::Error;

use crate::view::WeatherView;

const BASE: &str = include_str!("../templates/base.html");
const INDEX: &str = include_str!("../templates/index.html");
const ERROR: &str = include_str!("../templates/error.html");

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template compilation failed: {0}")]
    Compile(String),

    #[error("Template rendering failed: {0}")]
    Render(String),
}

impl From<tera::Error> for TemplateError {
    fn from(e: tera::Error) -> Self {
        Self::Render(e.to_string())
    }
}

/// Context for the weather page.
#[derive(Debug, Serialize)]
pub struct IndexPage<'a> {
    pub weather: &'a WeatherView,
    /// The search box value; empty when the default city was used.
    pub q: &'a str,
    pub quick_links: &'a [String],
}

/// Context for the error panel.
#[derive(Debug, Serialize)]
pub struct ErrorPage<'a> {
    pub heading: &'a str,
    pub message: &'a str,
    /// City to retry with; `None` retries the bare page.
    pub city: Option<&'a str>,
}

#[derive(Clone)]
pub struct PageTemplates {
    tera: Arc<Tera>,
}

impl std::fmt::Debug for PageTemplates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageTemplates").finish_non_exhaustive()
    }
}

impl PageTemplates {
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);
        tera.add_raw_templates(vec![
            ("base.html", BASE),
            ("index.html", INDEX),
            ("error.html", ERROR),
        ])
        .map_err(|e| TemplateError::Compile(e.to_string()))?;

        Ok(Self { tera: Arc::new(tera) })
    }

    pub fn render_index(&self, page: &IndexPage<'_>) -> Result<String, TemplateError> {
        self.render("index.html", page)
    }

    pub fn render_error(&self, page: &ErrorPage<'_>) -> Result<String, TemplateError> {
        self.render("error.html", page)
    }

    fn render<T: Serialize>(&self, name: &str, page: &T) -> Result<String, TemplateError> {
        let context = Context::from_serialize(page)?;
        Ok(self.tera.render(name, &context)?)
    }
}
