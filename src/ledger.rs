//! The in-memory table of transactions recorded during a session.

use crate::transaction::{Transaction, TransactionType};

/// The number of rows shown in the dashboard's recent transactions table.
pub const RECENT_TRANSACTIONS_LIMIT: usize = 10;

/// Totals across every transaction in a [Ledger].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    /// The sum of all income.
    pub income: f64,
    /// The sum of all expenses.
    pub expense: f64,
    /// Income minus expenses.
    pub net_savings: f64,
}

/// An append-only sequence of transactions kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `transaction` to the end of the ledger.
    pub fn push(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// All transactions in the order they were recorded.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The number of recorded transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether no transactions have been recorded.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Sum income and expenses separately and compute the net savings.
    pub fn summary(&self) -> Summary {
        let (income, expense) =
            self.transactions
                .iter()
                .fold((0.0, 0.0), |(income, expense), transaction| {
                    match transaction.type_ {
                        TransactionType::Income => (income + transaction.amount, expense),
                        TransactionType::Expense => (income, expense + transaction.amount),
                    }
                });

        Summary {
            income,
            expense,
            net_savings: income - expense,
        }
    }

    /// The last `count` recorded transactions, newest date first.
    ///
    /// Rows with the same date keep their insertion order.
    pub fn recent(&self, count: usize) -> Vec<&Transaction> {
        let start = self.transactions.len().saturating_sub(count);
        let mut recent: Vec<&Transaction> = self.transactions[start..].iter().collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent
    }
}

#[cfg(test)]
mod tests {
    use time::{PrimitiveDateTime, macros::datetime};

    use crate::transaction::{Transaction, TransactionType};

    use super::{Ledger, Summary};

    fn transaction(amount: f64, type_: TransactionType, date: PrimitiveDateTime) -> Transaction {
        Transaction::build(amount, date, type_)
            .category("Test")
            .finalise()
    }

    #[test]
    fn summary_of_empty_ledger_is_zero() {
        let ledger = Ledger::new();

        assert_eq!(ledger.summary(), Summary::default());
    }

    #[test]
    fn summary_computes_net_savings() {
        let mut ledger = Ledger::new();
        let date = datetime!(2025-03-01 09:00);
        ledger.push(transaction(5000.0, TransactionType::Income, date));
        ledger.push(transaction(1200.0, TransactionType::Income, date));
        ledger.push(transaction(800.0, TransactionType::Expense, date));
        ledger.push(transaction(150.0, TransactionType::Expense, date));

        let summary = ledger.summary();

        assert_eq!(summary.income, 6200.0);
        assert_eq!(summary.expense, 950.0);
        assert_eq!(summary.net_savings, 5250.0);
    }

    #[test]
    fn summary_can_be_negative() {
        let mut ledger = Ledger::new();
        let date = datetime!(2025-03-01 09:00);
        ledger.push(transaction(100.0, TransactionType::Income, date));
        ledger.push(transaction(300.0, TransactionType::Expense, date));

        assert_eq!(ledger.summary().net_savings, -200.0);
    }

    #[test]
    fn push_keeps_insertion_order() {
        let mut ledger = Ledger::new();
        ledger.push(transaction(1.0, TransactionType::Income, datetime!(2025-03-02 00:00)));
        ledger.push(transaction(2.0, TransactionType::Income, datetime!(2025-03-01 00:00)));

        let amounts: Vec<f64> = ledger.transactions().iter().map(|t| t.amount).collect();

        assert_eq!(amounts, vec![1.0, 2.0]);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn recent_takes_last_rows_and_sorts_newest_first() {
        let mut ledger = Ledger::new();
        ledger.push(transaction(1.0, TransactionType::Income, datetime!(2025-03-05 00:00)));
        ledger.push(transaction(2.0, TransactionType::Income, datetime!(2025-03-01 00:00)));
        ledger.push(transaction(3.0, TransactionType::Income, datetime!(2025-03-03 00:00)));
        ledger.push(transaction(4.0, TransactionType::Income, datetime!(2025-03-02 00:00)));

        let recent: Vec<f64> = ledger.recent(3).iter().map(|t| t.amount).collect();

        // The first row is outside the window even though it has the newest date.
        assert_eq!(recent, vec![3.0, 4.0, 2.0]);
    }

    #[test]
    fn recent_keeps_insertion_order_for_equal_dates() {
        let mut ledger = Ledger::new();
        let date = datetime!(2025-03-05 10:00);
        ledger.push(transaction(1.0, TransactionType::Income, date));
        ledger.push(transaction(2.0, TransactionType::Expense, date));

        let recent: Vec<f64> = ledger.recent(10).iter().map(|t| t.amount).collect();

        assert_eq!(recent, vec![1.0, 2.0]);
    }
}
