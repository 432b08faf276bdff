//! The route handler for generating the analysis charts.

use axum::{extract::State, response::Response};

use crate::{AppState, Error, alert::Alert, dashboard::dashboard_content_response};

use super::generate_analytics;

/// A route handler that renders the analysis charts for the current table.
///
/// Responds with the refreshed dashboard content and an alert listing the
/// generated files, or a warning if there is nothing to analyse yet.
pub async fn run_analysis_endpoint(State(state): State<AppState>) -> Response {
    let transactions = match state.lock_session() {
        Ok(session) => session.ledger.transactions().to_vec(),
        Err(error) => return error.into_alert_response(),
    };

    let output_dir = state.config.output_dir.clone();
    let result =
        tokio::task::spawn_blocking(move || generate_analytics(&transactions, &output_dir)).await;

    let alert = match result {
        Ok(Ok(paths)) => {
            let file_names: Vec<String> = paths
                .iter()
                .filter_map(|path| path.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .collect();

            Alert::success(&format!("Generated: {}", file_names.join(", ")))
        }
        Ok(Err(Error::NoData)) => Alert::warning("No data available for analysis."),
        Ok(Err(error)) => return error.into_alert_response(),
        Err(error) => {
            tracing::error!("analysis task failed: {error}");
            return Error::ChartRenderError(error.to_string()).into_alert_response();
        }
    };

    dashboard_content_response(&state, Some(alert))
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, http::StatusCode};
    use time::macros::datetime;

    use crate::{
        AppConfig, AppState,
        analysis::ChartKind,
        streaming::StreamingSettings,
        test_utils::{TempDir, must_select, parse_html_fragment, temp_dir, text_of},
        transaction::{Transaction, TransactionType},
    };

    use super::run_analysis_endpoint;

    fn test_state(dir: &TempDir) -> AppState {
        let config = AppConfig::new(
            dir.path().join("visuals"),
            dir.path().join("historical_data.csv"),
            "Etc/UTC",
        )
        .unwrap();

        AppState::new(config, StreamingSettings::default())
    }

    #[tokio::test]
    async fn warns_when_table_is_empty() {
        let dir = temp_dir("analysis_endpoint_empty");
        let state = test_state(&dir);

        let response = run_analysis_endpoint(State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let alert = must_select(&html, "div.alert");
        assert!(text_of(&alert).contains("No data available for analysis."));
        assert!(!dir.path().join("visuals").exists());
    }

    #[tokio::test]
    async fn lists_generated_files() {
        let dir = temp_dir("analysis_endpoint_files");
        let state = test_state(&dir);
        state.lock_session().unwrap().ledger.push(
            Transaction::build(250.0, datetime!(2025-03-02 10:00), TransactionType::Expense)
                .category("Food")
                .finalise(),
        );

        let response = run_analysis_endpoint(State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let alert_text = text_of(&must_select(&html, "div.alert"));
        assert!(alert_text.contains("Generated: "));
        for kind in ChartKind::ALL {
            assert!(alert_text.contains(&kind.file_name()));
            assert!(dir.path().join("visuals").join(kind.file_name()).is_file());
        }
    }
}
