//! Grouped sums over prepared transactions.
//!
//! Provides the monthly income/expense totals and the per-category expense
//! totals that the trend and distribution charts are drawn from.

use std::collections::BTreeMap;

use time::{Date, Month};

use crate::transaction::TransactionType;

use super::prepare::PreparedRow;

/// The total amount of one transaction type in one month.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct MonthlyTotal {
    /// The first day of the month.
    pub month: Date,
    pub type_: TransactionType,
    pub amount: f64,
}

/// Sums amounts grouped by month and transaction type.
///
/// # Returns
/// Totals sorted by month, then by type (expenses before income). Month/type
/// pairs without any transactions are omitted.
pub(super) fn monthly_totals(rows: &[PreparedRow<'_>]) -> Vec<MonthlyTotal> {
    let mut totals: BTreeMap<(Date, TransactionType), f64> = BTreeMap::new();

    for row in rows {
        *totals.entry((row.month_start, row.type_)).or_insert(0.0) += row.amount;
    }

    totals
        .into_iter()
        .map(|((month, type_), amount)| MonthlyTotal {
            month,
            type_,
            amount,
        })
        .collect()
}

/// Sums expense amounts grouped by category.
///
/// # Returns
/// `(category, total)` pairs sorted by category name.
pub(super) fn expense_by_category(rows: &[PreparedRow<'_>]) -> Vec<(String, f64)> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();

    for row in rows
        .iter()
        .filter(|row| row.type_ == TransactionType::Expense)
    {
        *totals.entry(row.category).or_insert(0.0) += row.amount;
    }

    totals
        .into_iter()
        .map(|(category, total)| (category.to_owned(), total))
        .collect()
}

/// Extracts the distinct months from `totals` in chronological order.
pub(super) fn sorted_months(totals: &[MonthlyTotal]) -> Vec<Date> {
    let mut months: Vec<Date> = totals.iter().map(|total| total.month).collect();
    months.sort();
    months.dedup();
    months
}

/// Lines up the totals for `type_` with `months`.
///
/// # Returns
/// One entry per month in `months`, with `None` for months that have no
/// transactions of `type_`.
pub(super) fn series_for_type(
    totals: &[MonthlyTotal],
    months: &[Date],
    type_: TransactionType,
) -> Vec<Option<f64>> {
    months
        .iter()
        .map(|month| {
            totals
                .iter()
                .find(|total| total.month == *month && total.type_ == type_)
                .map(|total| total.amount)
        })
        .collect()
}

/// Formats months as a three-letter abbreviation and year, e.g. "Jan 2025".
pub(super) fn format_month_labels(months: &[Date]) -> Vec<String> {
    let month_to_str = |date: &Date| {
        let name = match date.month() {
            Month::January => "Jan",
            Month::February => "Feb",
            Month::March => "Mar",
            Month::April => "Apr",
            Month::May => "May",
            Month::June => "Jun",
            Month::July => "Jul",
            Month::August => "Aug",
            Month::September => "Sep",
            Month::October => "Oct",
            Month::November => "Nov",
            Month::December => "Dec",
        };

        format!("{name} {}", date.year())
    };

    months.iter().map(month_to_str).collect()
}
