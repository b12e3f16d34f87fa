//! Unified error handling with Sentry integration.
//!
//! A failed backend call behind any admin view surfaces as [`ViewError`]: the
//! panel is replaced by that one message. The response stays `200 OK`
//! because htmx only swaps successful responses into the page.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use pharmaconnect_core::ViewError;

use crate::backend::BackendError;

/// Application-level error type for admin.
#[derive(Debug, Error)]
pub enum AppError {
    /// A backend call behind a view failed.
    #[error("{view}: {source}")]
    View {
        view: ViewError,
        #[source]
        source: BackendError,
    },
}

/// Error fragment rendered in place of a panel.
#[derive(Template)]
#[template(path = "partials/error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let event_id = sentry::capture_error(&self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Request error"
        );

        let message = match &self {
            Self::View { view, .. } => view.to_string(),
        };

        let body = ErrorTemplate { message: &message }
            .render()
            .unwrap_or_else(|e| {
                tracing::error!("Template render error: {}", e);
                message.clone()
            });

        (StatusCode::OK, Html(body)).into_response()
    }
}

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

/// Add a breadcrumb for admin actions.
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

    #[test]
    fn test_view_error_renders_message_with_ok_status() {
        let err = AppError::View {
            view: ViewError::UpdateOrder,
            source: BackendError::Api {
                status: 500,
                message: "boom".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Error updating order status.: API error: 500 - boom"
        );
        assert_eq!(err.into_response().status(), StatusCode::OK);
    }

    #[test]
    fn test_error_template_shows_message() {
        let html = ErrorTemplate {
            message: &ViewError::DeleteProduct.to_string(),
        }
        .render()
        .unwrap_or_default();
        assert!(html.contains("Error deleting the product."));
        assert!(html.contains("role=\"alert\""));
    }
}
