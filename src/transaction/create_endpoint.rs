//! Defines the endpoint for adding a transaction by hand.
use axum::{extract::State, response::Response};
// Must use axum_extra's Form since that tolerates omitted fields instead of
// rejecting the request like axum::Form.
use axum_extra::extract::Form;
use serde::Deserialize;
use time::{Date, PrimitiveDateTime, Time, macros::format_description};

use crate::{
    AppState, Error,
    alert::Alert,
    dashboard::dashboard_content_response,
    transaction::{Transaction, TransactionType, core::coerce_amount},
};

/// The form data for adding a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The calendar date of the transaction as "YYYY-MM-DD". Today is used
    /// if it is empty or invalid.
    #[serde(default)]
    pub date: String,
    /// The label used to group similar transactions.
    #[serde(default)]
    pub category: String,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: String,
    /// The amount as entered. Non-numeric text is recorded as zero.
    #[serde(default)]
    pub amount: String,
    /// Whether the amount was earned or spent.
    pub type_: TransactionType,
    /// How the transaction was paid.
    #[serde(default)]
    pub payment_method: String,
}

/// A route handler for adding a transaction.
///
/// Responds with the refreshed dashboard content and a success alert.
pub async fn create_transaction_endpoint(
    State(state): State<AppState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    match create_transaction(&state, form) {
        Ok(()) => dashboard_content_response(&state, Some(Alert::success("Transaction added."))),
        Err(error) => {
            tracing::error!("could not create transaction: {error}");
            error.into_alert_response()
        }
    }
}

fn create_transaction(state: &AppState, form: TransactionForm) -> Result<(), Error> {
    let today = state.config.local_now()?.date();
    let date = parse_form_date(&form.date).unwrap_or(today);

    let transaction = Transaction::build(
        coerce_amount(&form.amount),
        PrimitiveDateTime::new(date, Time::MIDNIGHT),
        form.type_,
    )
    .category(&form.category)
    .description(&form.description)
    .payment_method(&form.payment_method)
    .finalise();

    tracing::debug!("Adding manual transaction {transaction:?}");

    state
        .lock_session()?
        .record(transaction, &state.config.csv_path)
}

fn parse_form_date(text: &str) -> Option<Date> {
    Date::parse(text.trim(), format_description!("[year]-[month]-[day]")).ok()
}
