//! Synthetic transactions for simulating a live feed of account activity.

use rand::{
    Rng,
    distributions::{Distribution, WeightedIndex},
    seq::SliceRandom,
};
use time::PrimitiveDateTime;

use crate::transaction::{PAYMENT_METHODS, Transaction, TransactionType};

/// The categories a generated income can belong to.
pub const INCOME_CATEGORIES: [&str; 3] = ["Salary", "Investment", "Gift"];

/// The categories a generated expense can belong to.
pub const EXPENSE_CATEGORIES: [&str; 7] = [
    "Food",
    "Transport",
    "Groceries",
    "Entertainment",
    "Rent",
    "Utilities",
    "Shopping",
];

/// The smallest amount a generated transaction can have.
pub const MIN_AMOUNT: u32 = 100;
/// The largest amount a generated transaction can have.
pub const MAX_AMOUNT: u32 = 5000;

const TRANSACTION_TYPES: [TransactionType; 2] = [TransactionType::Expense, TransactionType::Income];
// Expense is picked 30% of the time, income 70%.
const TRANSACTION_TYPE_WEIGHTS: [u32; 2] = [3, 7];

const FALLBACK_INCOME_DESCRIPTION: &str = "Income received";
const FALLBACK_EXPENSE_DESCRIPTION: &str = "Expense made";

fn income_descriptions(category: &str) -> &'static [&'static str] {
    match category {
        "Salary" => &["Monthly Salary", "Bonus Payment", "Freelance Project Income"],
        "Investment" => &["Stock Dividend", "Interest from Savings", "Crypto Profit"],
        "Gift" => &[
            "Birthday Gift Received",
            "Cashback Reward",
            "Refund from Amazon",
        ],
        _ => &[FALLBACK_INCOME_DESCRIPTION],
    }
}

fn expense_descriptions(category: &str) -> &'static [&'static str] {
    match category {
        "Food" => &[
            "Dinner at restaurant",
            "Groceries from supermarket",
            "Coffee shop bill",
        ],
        "Transport" => &["Cab fare", "Fuel payment", "Bus ticket"],
        "Rent" => &["Monthly house rent", "Office space rent"],
        "Entertainment" => &["Movie tickets", "Music subscription", "Weekend outing"],
        "Utilities" => &["Electricity bill", "Mobile recharge", "Internet bill"],
        "Shopping" => &[
            "Online purchase",
            "Mall shopping",
            "Clothing and accessories",
        ],
        _ => &[FALLBACK_EXPENSE_DESCRIPTION],
    }
}

/// The categories generated transactions of `type_` are drawn from.
pub fn categories_for(type_: TransactionType) -> &'static [&'static str] {
    match type_ {
        TransactionType::Income => &INCOME_CATEGORIES,
        TransactionType::Expense => &EXPENSE_CATEGORIES,
    }
}

/// Pick a plausible description for a transaction in `category`.
///
/// Categories without their own descriptions get a generic one, e.g.
/// "Expense made".
pub fn generate_description<R: Rng + ?Sized>(
    rng: &mut R,
    category: &str,
    type_: TransactionType,
) -> &'static str {
    let options = match type_ {
        TransactionType::Income => income_descriptions(category),
        TransactionType::Expense => expense_descriptions(category),
    };

    options.choose(rng).copied().unwrap_or(match type_ {
        TransactionType::Income => FALLBACK_INCOME_DESCRIPTION,
        TransactionType::Expense => FALLBACK_EXPENSE_DESCRIPTION,
    })
}

fn generate_transaction_type<R: Rng + ?Sized>(rng: &mut R) -> TransactionType {
    match WeightedIndex::new(TRANSACTION_TYPE_WEIGHTS) {
        Ok(distribution) => TRANSACTION_TYPES[distribution.sample(rng)],
        // The weights are constant and non-zero so this branch is unreachable.
        Err(_) => TransactionType::Income,
    }
}

/// Create a random transaction dated `now`.
pub fn generate_transaction<R: Rng + ?Sized>(rng: &mut R, now: PrimitiveDateTime) -> Transaction {
    let type_ = generate_transaction_type(rng);
    let category = categories_for(type_)
        .choose(rng)
        .copied()
        .unwrap_or_default();
    let description = generate_description(rng, category, type_);
    let amount = rng.gen_range(MIN_AMOUNT..=MAX_AMOUNT);
    let payment_method = PAYMENT_METHODS.choose(rng).copied().unwrap_or_default();

    Transaction::build(f64::from(amount), now, type_)
        .category(category)
        .description(description)
        .payment_method(payment_method)
        .finalise()
}
