//! Route handlers for the streaming controls.

use axum::{
    extract::State,
    response::Response,
};
// Must use axum_extra's Form since an unchecked checkbox is omitted from the
// form data entirely.
use axum_extra::extract::Form;
use serde::Deserialize;

use crate::{AppState, Error, dashboard::dashboard_content_response, streaming::StreamingSettings};

/// The form data for the streaming settings controls.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    /// How often to generate a transaction, in seconds.
    pub refresh_secs: u64,
    /// Present (usually as "on") when the persist checkbox is ticked.
    #[serde(default)]
    pub persist: Option<String>,
}

/// A route handler that starts streaming if it is stopped, and stops it otherwise.
///
/// Responds with the refreshed dashboard content.
pub async fn toggle_streaming_endpoint(State(state): State<AppState>) -> Response {
    if let Err(error) = toggle_streaming(&state) {
        return error.into_alert_response();
    }

    dashboard_content_response(&state, None)
}

fn toggle_streaming(state: &AppState) -> Result<(), Error> {
    let period = state.lock_session()?.settings.period();
    let mut streamer = state.lock_streamer()?;

    if streamer.is_streaming() {
        streamer.stop();
    } else {
        streamer.start(state.session.clone(), state.config.clone(), period);
    }

    Ok(())
}

/// A route handler for changing the refresh interval and persistence flag.
///
/// The refresh interval is clamped to the allowed range. A running stream is
/// restarted so the new interval takes effect immediately.
pub async fn update_settings_endpoint(
    State(state): State<AppState>,
    Form(form): Form<SettingsForm>,
) -> Response {
    let settings = StreamingSettings::new(form.refresh_secs, form.persist.is_some());

    match update_settings(&state, settings) {
        Ok(()) => dashboard_content_response(&state, None),
        Err(error) => error.into_alert_response(),
    }
}

fn update_settings(state: &AppState, settings: StreamingSettings) -> Result<(), Error> {
    let previous = {
        let mut session = state.lock_session()?;
        let previous = session.settings;
        session.settings = settings;
        previous
    };

    if settings.persist && !previous.persist {
        create_csv_directory(state)?;
    }

    if settings.refresh_secs != previous.refresh_secs {
        tracing::info!("Refresh interval changed to {}s", settings.refresh_secs);
        state.lock_streamer()?.restart_if_streaming(
            state.session.clone(),
            state.config.clone(),
            settings.period(),
        );
    }

    Ok(())
}

fn create_csv_directory(state: &AppState) -> Result<(), Error> {
    let Some(directory) = state
        .config
        .csv_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    else {
        return Ok(());
    };

    std::fs::create_dir_all(directory).map_err(|error| {
        tracing::error!(
            "could not create directory {}: {error}",
            directory.display()
        );
        Error::IoError(error.to_string())
    })
}
