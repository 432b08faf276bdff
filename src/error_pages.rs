//! Full-page responses for requests that cannot be served.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// An error page with a short description of what went wrong and how the
/// user might fix it.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPage<'a> {
    pub status: StatusCode,
    pub description: &'a str,
    pub fix: &'a str,
}

impl<'a> ErrorPage<'a> {
    /// A 500 page.
    pub fn internal_server_error(description: &'a str, fix: &'a str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            description,
            fix,
        }
    }

    /// A 404 page.
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            description: "Page not found.",
            fix: "Check the address, or head back to the dashboard.",
        }
    }

    fn title(&self) -> &'static str {
        match self.status {
            StatusCode::NOT_FOUND => "Not Found",
            _ => "Internal Server Error",
        }
    }
}

impl Default for ErrorPage<'_> {
    fn default() -> Self {
        Self::internal_server_error(
            "Sorry, something went wrong.",
            "Try again later or check the server logs",
        )
    }
}

impl IntoResponse for ErrorPage<'_> {
    fn into_response(self) -> Response {
        let markup = error_view(
            self.title(),
            self.status.as_str(),
            self.description,
            self.fix,
        );

        (self.status, Html(markup.into_string())).into_response()
    }
}

pub async fn get_internal_server_error_page() -> Response {
    ErrorPage::default().into_response()
}

pub async fn get_404_not_found() -> Response {
    ErrorPage::not_found().into_response()
}
