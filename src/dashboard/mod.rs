//! Dashboard module
//!
//! Provides the main page with the streaming controls, summary metrics,
//! recent transactions and the generated analysis charts.

mod handlers;
mod snapshot;
mod view;

pub use handlers::{get_dashboard_page, get_overview_partial};

pub(crate) use handlers::dashboard_content_response;
