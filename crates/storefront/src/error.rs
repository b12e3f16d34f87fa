//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! A failed backend call surfaces as [`ViewError`]: one generic message that
//! replaces the view's content. The response stays `200 OK` because htmx only
//! swaps successful responses into the page.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use pharmaconnect_core::ViewError;

use crate::backend::BackendError;
use crate::filters;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// A backend call behind a view failed.
    #[error("{view}: {source}")]
    View {
        view: ViewError,
        #[source]
        source: BackendError,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Report server errors to Sentry and return the status and message
    /// shown to the visitor.
    fn report(&self) -> (StatusCode, String) {
        match self {
            Self::View { view, .. } => {
                let event_id = sentry::capture_error(self);
                tracing::error!(
                    error = %self,
                    sentry_event_id = %event_id,
                    "Request error"
                );
                (StatusCode::OK, view.to_string())
            }
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "Product not found".to_string()),
        }
    }
}

/// Error fragment rendered in place of a view's content.
#[derive(Template)]
#[template(path = "partials/error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
}

/// Error rendered as a full page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPageTemplate<'a> {
    pub message: &'a str,
}

fn render_or_plain(template: &impl Template, message: &str) -> String {
    template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        message.to_string()
    })
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.report();
        let body = render_or_plain(&ErrorTemplate { message: &message }, &message);
        (status, Html(body)).into_response()
    }
}

/// An [`AppError`] raised by a full-page route.
///
/// Renders the same message inside the site layout instead of as a bare
/// fragment.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = self.0.report();
        let body = render_or_plain(&ErrorPageTemplate { message: &message }, &message);
        (status, Html(body)).into_response()
    }
}

/// Result type for full-page routes.
pub type PageResult<T> = std::result::Result<T, PageError>;

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Attach the view-level message to a failed backend call.
pub trait ViewContext<T> {
    /// Map a backend failure to the given view error.
    ///
    /// # Errors
    ///
    /// Returns `AppError::View` when `self` is an error.
    fn or_view(self, view: ViewError) -> Result<T>;
}

impl<T> ViewContext<T> for std::result::Result<T, BackendError> {
    fn or_view(self, view: ViewError) -> Result<T> {
        self.map_err(|source| AppError::View { view, source })
    }
}

/// Add a breadcrumb for visitor actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str) {
    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_failure() -> BackendError {
        BackendError::Api {
            status: 500,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product-123".to_string());
        assert_eq!(err.to_string(), "Not found: product-123");

        let err = AppError::View {
            view: ViewError::FetchProducts,
            source: api_failure(),
        };
        assert_eq!(
            err.to_string(),
            "Error fetching products: API error: 500 - boom"
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::View {
                view: ViewError::FetchProducts,
                source: api_failure(),
            }),
            StatusCode::OK
        );
        assert_eq!(
            get_status(AppError::NotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_page_error_renders_inside_layout() {
        let response = PageError(AppError::View {
            view: ViewError::FetchProducts,
            source: api_failure(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let html = ErrorPageTemplate {
            message: "Error fetching products",
        }
        .render()
        .unwrap_or_default();
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("Error fetching products"));
        assert!(html.contains("role=\"alert\""));
    }

    #[test]
    fn test_or_view_keeps_ok_values() {
        let ok: std::result::Result<u8, BackendError> = Ok(7);
        assert!(matches!(ok.or_view(ViewError::FetchProducts), Ok(7)));
    }
}
