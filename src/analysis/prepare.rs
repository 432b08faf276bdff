//! Derives the calendar columns used by the analysis from each transaction.

use time::Date;

use crate::transaction::{Transaction, TransactionType};

/// A transaction with the derived columns needed for grouping and correlation.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct PreparedRow<'a> {
    /// The first day of the month the transaction happened in.
    pub month_start: Date,
    pub day: u8,
    pub month: u8,
    pub year: i32,
    pub amount: f64,
    pub amount_abs: f64,
    pub type_: TransactionType,
    pub category: &'a str,
}

impl<'a> From<&'a Transaction> for PreparedRow<'a> {
    fn from(transaction: &'a Transaction) -> Self {
        let date = transaction.date.date();
        let amount = if transaction.amount.is_finite() {
            transaction.amount
        } else {
            0.0
        };

        Self {
            month_start: date.replace_day(1).unwrap_or(date),
            day: date.day(),
            month: u8::from(date.month()),
            year: date.year(),
            amount,
            amount_abs: amount.abs(),
            type_: transaction.type_,
            category: &transaction.category,
        }
    }
}

/// Prepare every transaction for analysis, keeping their order.
pub(super) fn prepare(transactions: &[Transaction]) -> Vec<PreparedRow<'_>> {
    transactions.iter().map(PreparedRow::from).collect()
}
