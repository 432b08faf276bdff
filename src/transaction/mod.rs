//! Transaction management for the finance dashboard.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The form and route handler for adding a transaction by hand

mod core;
mod create_endpoint;
mod form;

pub use core::{PAYMENT_METHODS, Transaction, TransactionBuilder, TransactionType};
pub use create_endpoint::create_transaction_endpoint;
pub use form::manual_transaction_form;
