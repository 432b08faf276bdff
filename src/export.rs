//! Writes the transaction table as CSV, either to disk or as a download.

use std::{fs::File, io::Write, path::Path};

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{AppState, Error, transaction::Transaction};

/// The file name suggested to browsers when downloading the table.
const DOWNLOAD_FILE_NAME: &str = "historical_data.csv";

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "Type")]
    type_: &'static str,
    #[serde(rename = "Payment_Method")]
    payment_method: &'a str,
}

impl<'a> From<&'a Transaction> for CsvRow<'a> {
    fn from(transaction: &'a Transaction) -> Self {
        Self {
            date: transaction.formatted_date(),
            category: &transaction.category,
            description: &transaction.description,
            amount: transaction.amount,
            type_: transaction.type_.as_str(),
            payment_method: &transaction.payment_method,
        }
    }
}

/// Serialize `transactions` as CSV with a header row into `writer`.
///
/// # Errors
/// Returns [Error::CsvError] if a row could not be written.
pub fn write_transactions<W: Write>(transactions: &[Transaction], writer: W) -> Result<W, Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for transaction in transactions {
        csv_writer
            .serialize(CsvRow::from(transaction))
            .map_err(|error| Error::CsvError(error.to_string()))?;
    }

    // An empty table still gets a header so the file is always readable.
    if transactions.is_empty() {
        csv_writer
            .write_record([
                "Date",
                "Category",
                "Description",
                "Amount",
                "Type",
                "Payment_Method",
            ])
            .map_err(|error| Error::CsvError(error.to_string()))?;
    }

    csv_writer
        .into_inner()
        .map_err(|error| Error::CsvError(error.to_string()))
}

/// Overwrite the file at `path` with `transactions`.
///
/// Missing parent directories are created.
///
/// # Errors
/// Returns [Error::IoError] if the file or its directory could not be created,
/// or [Error::CsvError] if the rows could not be written.
pub fn write_csv(transactions: &[Transaction], path: &Path) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|error| {
            tracing::error!("could not create directory {}: {error}", parent.display());
            Error::IoError(error.to_string())
        })?;
    }

    let file = File::create(path).map_err(|error| {
        tracing::error!("could not create CSV file {}: {error}", path.display());
        Error::IoError(error.to_string())
    })?;

    write_transactions(transactions, file)?;
    tracing::debug!(
        "wrote {} transactions to {}",
        transactions.len(),
        path.display()
    );

    Ok(())
}

/// A route handler that downloads the current transaction table as CSV.
pub async fn download_csv_endpoint(State(state): State<AppState>) -> Response {
    let bytes = match state
        .lock_session()
        .and_then(|session| write_transactions(session.ledger.transactions(), Vec::new()))
    {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("could not export transactions as CSV: {error}");
            return error.into_response();
        }
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILE_NAME}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, http::StatusCode, http::header};
    use time::macros::datetime;

    use crate::{
        AppConfig, AppState,
        streaming::StreamingSettings,
        test_utils::temp_dir,
        transaction::{Transaction, TransactionType},
    };

    use super::{download_csv_endpoint, write_csv, write_transactions};

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            Transaction::build(5000.0, datetime!(2025-02-01 09:15:30), TransactionType::Income)
                .category("Salary")
                .description("Monthly Salary")
                .payment_method("Bank Transfer")
                .finalise(),
            Transaction::build(250.5, datetime!(2025-02-03 19:00), TransactionType::Expense)
                .category("Food")
                .description("Dinner, with friends")
                .payment_method("UPI")
                .finalise(),
        ]
    }

    #[test]
    fn writes_header_and_rows() {
        let bytes = write_transactions(&sample_transactions(), Vec::new()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Date,Category,Description,Amount,Type,Payment_Method");
        assert_eq!(
            lines[1],
            "2025-02-01 09:15:30,Salary,Monthly Salary,5000.0,Income,Bank Transfer"
        );
        assert_eq!(
            lines[2],
            "2025-02-03 19:00:00,Food,\"Dinner, with friends\",250.5,Expense,UPI"
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn empty_table_writes_header_only() {
        let bytes = write_transactions(&[], Vec::new()).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(
            text.trim_end(),
            "Date,Category,Description,Amount,Type,Payment_Method"
        );
    }

    #[test]
    fn write_csv_creates_directories_and_overwrites() {
        let dir = temp_dir("write_csv_overwrites");
        let path = dir.path().join("data").join("historical_data.csv");
        let transactions = sample_transactions();

        write_csv(&transactions, &path).unwrap();
        write_csv(&transactions[..1], &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2, "file should only hold the latest table");
    }

    #[tokio::test]
    async fn download_returns_csv_attachment() {
        let config = AppConfig::new("visuals", "data/historical_data.csv", "Etc/UTC").unwrap();
        let state = AppState::new(config, StreamingSettings::default());
        for transaction in sample_transactions() {
            state.lock_session().unwrap().ledger.push(transaction);
        }

        let response = download_csv_endpoint(State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv; charset=utf-8"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(String::from_utf8_lossy(&body).lines().count(), 3);
    }
}
