//! Dashboard HTTP handlers.
//!
//! This module contains:
//! - Route handlers for the dashboard page and its overview partial
//! - The shared response used by handlers that change session state

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{AppState, Error, alert::Alert, endpoints};

use super::{
    snapshot::DashboardSnapshot,
    view::{dashboard_content_view, dashboard_view, overview_view},
};

/// Display the dashboard page.
pub async fn get_dashboard_page(State(state): State<AppState>) -> Result<Response, Error> {
    let snapshot = DashboardSnapshot::take(&state)
        .inspect_err(|error| tracing::error!("could not read dashboard state: {error}"))?;

    Ok(dashboard_view(&snapshot).into_response())
}

/// Display the overview section, used for polling while streaming.
///
/// Polling requests cannot show an alert in a useful place, so failures
/// redirect the client to the error page instead.
pub async fn get_overview_partial(State(state): State<AppState>) -> Response {
    match DashboardSnapshot::take(&state) {
        Ok(snapshot) => overview_view(&snapshot).into_response(),
        Err(error) => {
            tracing::error!("could not read dashboard state: {error}");
            (
                HxRedirect(endpoints::INTERNAL_ERROR_VIEW.to_owned()),
                StatusCode::OK,
            )
                .into_response()
        }
    }
}

/// The refreshed dashboard content with an optional `alert` shown above the
/// overview.
pub(crate) fn dashboard_content_response(state: &AppState, alert: Option<Alert>) -> Response {
    match DashboardSnapshot::take(state) {
        Ok(snapshot) => dashboard_content_view(&snapshot, alert).into_response(),
        Err(error) => {
            tracing::error!("could not read dashboard state: {error}");
            error.into_alert_response()
        }
    }
}
