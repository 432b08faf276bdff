//! Defines the core data model for transactions.

use std::{fmt::Display, str::FromStr};

use serde::Deserialize;
use time::{PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description};

// ============================================================================
// MODELS
// ============================================================================

/// The ways a transaction can be paid for.
pub const PAYMENT_METHODS: [&str; 4] = ["UPI", "Credit Card", "Debit Card", "Bank Transfer"];

/// The categories offered by the manual transaction form.
pub const MANUAL_CATEGORIES: [&str; 7] = [
    "Food",
    "Transport",
    "Groceries",
    "Entertainment",
    "Rent",
    "Investment",
    "Salary",
];

/// The format used when displaying or exporting a transaction's timestamp.
pub const DATE_TIME_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum TransactionType {
    /// Money was spent.
    Expense,
    /// Money was earned.
    Income,
}

impl TransactionType {
    /// The display name, e.g. "Income".
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "Expense",
            TransactionType::Income => "Income",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    /// Parses "income" or "expense", ignoring case and surrounding whitespace.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!(
                "invalid transaction type \"{other}\", expected \"income\" or \"expense\""
            )),
        }
    }
}

impl TryFrom<String> for TransactionType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Parse `text` as an amount of money.
///
/// Anything that is not a finite number is treated as zero.
pub fn coerce_amount(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => amount,
        _ => 0.0,
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// When the transaction happened, in local time.
    pub date: PrimitiveDateTime,
    /// The label used to group similar transactions.
    pub category: String,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The magnitude of the transaction.
    pub amount: f64,
    /// Whether the amount was earned or spent.
    pub type_: TransactionType,
    /// How the transaction was paid, e.g. "UPI".
    pub payment_method: String,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(amount: f64, date: PrimitiveDateTime, type_: TransactionType) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            date,
            type_,
            category: String::new(),
            description: String::new(),
            payment_method: String::new(),
        }
    }

    /// The transaction date formatted as "YYYY-MM-DD HH:MM:SS".
    pub fn formatted_date(&self) -> String {
        self.date
            .format(DATE_TIME_FORMAT)
            .unwrap_or_else(|_| self.date.to_string())
    }
}

/// A builder for creating [Transaction] instances.
///
/// The amount, date and type are required, the text fields default to empty
/// strings. Call `finalise()` to create the actual [Transaction].
///
/// # Examples
///
/// ```ignore
/// use time::macros::datetime;
///
/// use crate::transaction::{Transaction, TransactionType};
///
/// let transaction = Transaction::build(450.0, datetime!(2025-01-15 12:00), TransactionType::Expense)
///     .category("Food")
///     .description("Coffee shop bill")
///     .payment_method("UPI")
///     .finalise();
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    amount: f64,
    date: PrimitiveDateTime,
    type_: TransactionType,
    category: String,
    description: String,
    payment_method: String,
}

impl TransactionBuilder {
    /// Set the category for the transaction.
    pub fn category(mut self, category: &str) -> Self {
        category.clone_into(&mut self.category);
        self
    }

    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        description.clone_into(&mut self.description);
        self
    }

    /// Set the payment method for the transaction.
    pub fn payment_method(mut self, payment_method: &str) -> Self {
        payment_method.clone_into(&mut self.payment_method);
        self
    }

    /// Build the final [Transaction] instance.
    pub fn finalise(self) -> Transaction {
        Transaction {
            date: self.date,
            category: self.category,
            description: self.description,
            amount: self.amount,
            type_: self.type_,
            payment_method: self.payment_method,
        }
    }
}
