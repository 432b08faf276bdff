//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The overview section of the dashboard, polled while streaming.
pub const DASHBOARD_OVERVIEW: &str = "/dashboard/overview";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for the generated analysis charts.
pub const VISUALS: &str = "/visuals";

/// The route to add a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to download the transaction table as CSV.
pub const TRANSACTIONS_CSV: &str = "/api/transactions.csv";
/// The route to start or stop streaming.
pub const STREAMING_API: &str = "/api/streaming";
/// The route to update the refresh interval and persistence flag.
pub const SETTINGS_API: &str = "/api/settings";
/// The route to generate the analysis charts.
pub const ANALYSIS_API: &str = "/api/analysis";
