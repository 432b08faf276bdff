//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    analysis::run_analysis_endpoint,
    dashboard::{get_dashboard_page, get_overview_partial},
    endpoints,
    error_pages::{get_404_not_found, get_internal_server_error_page},
    export::download_csv_endpoint,
    streaming::{toggle_streaming_endpoint, update_settings_endpoint},
    transaction::create_transaction_endpoint,
};

/// Return a router with all the app's routes.
///
/// Charts are served from the configured output directory under
/// [endpoints::VISUALS].
pub fn build_router(state: AppState) -> Router {
    let visuals = ServeDir::new(&state.config.output_dir);

    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::DASHBOARD_OVERVIEW, get(get_overview_partial))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(endpoints::TRANSACTIONS_CSV, get(download_csv_endpoint))
        .route(endpoints::STREAMING_API, post(toggle_streaming_endpoint))
        .route(endpoints::SETTINGS_API, put(update_settings_endpoint))
        .route(endpoints::ANALYSIS_API, post(run_analysis_endpoint))
        .nest_service(endpoints::VISUALS, visuals)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}


#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::{
        AppConfig, AppState, build_router, endpoints, streaming::StreamingSettings,
        test_utils::{TempDir, temp_dir},
    };

    fn test_server(dir: &TempDir) -> (TestServer, AppState) {
        let config = AppConfig::new(
            dir.path().join("visuals"),
            dir.path().join("data").join("historical_data.csv"),
            "Etc/UTC",
        )
        .unwrap();
        let state = AppState::new(config, StreamingSettings::default());
        let server =
            TestServer::try_new(build_router(state.clone())).expect("Could not create test server.");

        (server, state)
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let dir = temp_dir("router_404");
        let (server, _) = test_server(&dir);

        let response = server.get("/does-not-exist").await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn dashboard_page_is_served() {
        let dir = temp_dir("router_dashboard");
        let (server, _) = test_server(&dir);

        let response = server.get(endpoints::DASHBOARD_VIEW).await;

        response.assert_status_ok();
        assert!(response.text().contains("Dynamic Personal Finance Dashboard"));
    }

    #[tokio::test]
    async fn added_transaction_appears_in_overview_and_csv() {
        let dir = temp_dir("router_add_transaction");
        let (server, state) = test_server(&dir);
        let form = [
            ("date", "2025-04-01"),
            ("category", "Rent"),
            ("description", "April rent"),
            ("amount", "4500"),
            ("type_", "expense"),
            ("payment_method", "Bank Transfer"),
        ];

        server
            .post(endpoints::TRANSACTIONS_API)
            .form(&form)
            .await
            .assert_status_ok();

        assert_eq!(state.lock_session().unwrap().ledger.len(), 1);

        let overview = server.get(endpoints::DASHBOARD_OVERVIEW).await;
        overview.assert_status_ok();
        assert!(overview.text().contains("April rent"));
        assert!(overview.text().contains("₹4,500"));

        let csv = server.get(endpoints::TRANSACTIONS_CSV).await;
        csv.assert_status_ok();
        assert_eq!(
            csv.text(),
            "Date,Category,Description,Amount,Type,Payment_Method\n\
            2025-04-01 00:00:00,Rent,April rent,4500.0,Expense,Bank Transfer\n"
        );
    }

    #[tokio::test]
    async fn settings_form_without_checkbox_disables_persistence() {
        let dir = temp_dir("router_settings");
        let (server, state) = test_server(&dir);

        server
            .put(endpoints::SETTINGS_API)
            .form(&[("refresh_secs", "8"), ("persist", "on")])
            .await
            .assert_status_ok();
        assert_eq!(
            state.lock_session().unwrap().settings,
            StreamingSettings::new(8, true)
        );

        server
            .put(endpoints::SETTINGS_API)
            .form(&[("refresh_secs", "8")])
            .await
            .assert_status_ok();
        assert_eq!(
            state.lock_session().unwrap().settings,
            StreamingSettings::new(8, false)
        );
    }

    #[tokio::test]
    async fn generated_charts_are_served() {
        let dir = temp_dir("router_visuals");
        let (server, _) = test_server(&dir);
        let form = [("amount", "100"), ("type_", "income")];
        server.post(endpoints::TRANSACTIONS_API).form(&form).await;

        server
            .post(endpoints::ANALYSIS_API)
            .await
            .assert_status_ok();

        let chart = crate::analysis::ChartKind::MonthlyTrend.file_name();
        let response = server.get(&format!("{}/{chart}", endpoints::VISUALS)).await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn streaming_toggle_starts_generator() {
        let dir = temp_dir("router_streaming");
        let (server, state) = test_server(&dir);

        server
            .post(endpoints::STREAMING_API)
            .await
            .assert_status_ok();
        assert!(state.lock_streamer().unwrap().is_streaming());

        // The first tick fires immediately.
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        assert!(!state.lock_session().unwrap().ledger.is_empty());

        server
            .post(endpoints::STREAMING_API)
            .await
            .assert_status_ok();
        assert!(!state.lock_streamer().unwrap().is_streaming());
    }
}
