//! A live personal finance dashboard.
//!
//! Transactions are added by hand or streamed from a synthetic generator into
//! an in-memory table. The dashboard shows the running totals and the most
//! recent transactions, and renders analysis charts on demand.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod analysis;
mod app_state;
mod dashboard;
mod endpoints;
mod error_pages;
mod export;
mod generator;
mod html;
mod ledger;
mod logging;
mod routing;
mod streaming;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use analysis::{ChartKind, generate_analytics};
pub use app_state::{AppConfig, AppState, Session};
pub use export::write_csv;
pub use ledger::{Ledger, Summary};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use streaming::{
    DEFAULT_REFRESH_SECS, MAX_REFRESH_SECS, MIN_REFRESH_SECS, Streamer, StreamingSettings,
};
pub use transaction::{Transaction, TransactionBuilder, TransactionType};

use crate::{alert::Alert, error_pages::ErrorPage};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire a lock on the session or the streamer.
    ///
    /// This only happens if a thread panicked while holding the lock.
    #[error("could not acquire the state lock")]
    StateLockError,

    /// An operation that needs at least one transaction was run on an empty
    /// table.
    #[error("there are no transactions")]
    NoData,

    /// A file or directory could not be read or written.
    #[error("an IO error occurred: {0}")]
    IoError(String),

    /// The transaction table could not be written as CSV.
    #[error("could not write CSV: {0}")]
    CsvError(String),

    /// An analysis chart could not be rendered or saved.
    #[error("could not render chart: {0}")]
    ChartRenderError(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => ErrorPage::internal_server_error(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            )
            .into_response(),
            Error::StateLockError => ErrorPage::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                ErrorPage::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        let (status, alert) = match self {
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Invalid Timezone Settings",
                    &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                ),
            ),
            Error::NoData => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::warning("No data available for analysis."),
            ),
            Error::IoError(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error("Could not write file", &details),
            ),
            Error::CsvError(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error("Could not save transactions to CSV", &details),
            ),
            Error::ChartRenderError(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error("Could not generate charts", &details),
            ),
            Error::StateLockError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                ),
            ),
        };

        (status, alert.into_html()).into_response()
    }
}
