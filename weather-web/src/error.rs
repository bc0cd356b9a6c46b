//! Page error handling.
//!
//! Every lookup failure becomes an error panel with a retry link. Template
//! failures cannot render a panel and fall back to plain text.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use weather_core::FetchError;

use crate::templates::{ErrorPage, PageTemplates, TemplateError};

#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl PageError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Fetch(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Self::Fetch(_) => StatusCode::BAD_GATEWAY,
            Self::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Panel heading: the status line for a missing location, a generic
    /// "Error" for everything else.
    pub fn heading(&self) -> String {
        match self {
            Self::Fetch(FetchError::LocationNotFound { .. }) => {
                let status = self.status();
                format!("{} {}", status.as_u16(), status.canonical_reason().unwrap_or_default())
            }
            _ => "Error".to_string(),
        }
    }

    /// Text shown under the heading.
    pub fn message(&self) -> String {
        match self {
            Self::Fetch(FetchError::LocationNotFound { message, .. }) => message.clone(),
            other => other.to_string(),
        }
    }

    /// Render the error panel, retrying with `city` when one was requested.
    pub fn into_page(self, templates: &PageTemplates, city: Option<&str>) -> Response {
        let status = self.status();
        let heading = self.heading();
        let message = self.message();

        match templates.render_error(&ErrorPage { heading: &heading, message: &message, city }) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => PageError::from(e).into_response(),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found() -> PageError {
        PageError::Fetch(FetchError::LocationNotFound {
            city: "Atlantis".into(),
            message: "city not found".into(),
        })
    }

    #[test]
    fn not_found_uses_status_line_heading() {
        let err = not_found();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.heading(), "404 Not Found");
        assert_eq!(err.message(), "city not found");
    }

    #[test]
    fn other_fetch_errors_are_generic() {
        let err = PageError::Fetch(FetchError::Malformed("missing field `main`".into()));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.heading(), "Error");
        assert!(err.message().contains("missing field `main`"));
    }

    #[test]
    fn template_errors_are_internal() {
        let err = PageError::Template(TemplateError::Render("oops".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn into_page_renders_panel() {
        let templates = PageTemplates::new().unwrap_or_else(|e| panic!("templates compile: {e}"));
        let response = not_found().into_page(&templates, Some("Atlantis"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
