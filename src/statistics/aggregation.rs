//! Aggregation of the transaction ledger into period totals.
//!
//! Provides functions to sum income and expenses for a month, bucket a
//! year's spending by category and calendar month, sum private spending per
//! user, and pick out the largest public expenses.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use time::Month;

use crate::{
    local_date::MONTH_NAMES,
    transaction::{Transaction, TransactionWithOwner},
    user::User,
};

use super::TOP_ENTRY_COUNT;

/// The category label used when a transaction has no category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Whether `transaction` falls in the given calendar month.
pub(super) fn in_month(transaction: &Transaction, year: i32, month: Month) -> bool {
    transaction.date.year() == year && transaction.date.month() == month
}

/// The category to aggregate `transaction` under.
pub(super) fn category_label(transaction: &Transaction) -> &str {
    let category = transaction.category.trim();

    if category.is_empty() {
        UNCATEGORIZED_LABEL
    } else {
        category
    }
}

/// Monthly income, expenses and net balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    /// Sum of the positive amounts in the month.
    pub income: f64,
    /// Sum of the absolute values of the negative amounts in the month.
    pub expenses: f64,
    /// `income - expenses`.
    pub net_balance: f64,
}

/// Sum income and expenses for the given calendar month.
///
/// Zero amounts count towards neither total. An empty ledger produces all
/// zeroes.
pub fn monthly_totals(
    transactions: &[TransactionWithOwner],
    year: i32,
    month: Month,
) -> MonthlyTotals {
    let mut totals = MonthlyTotals {
        income: 0.0,
        expenses: 0.0,
        net_balance: 0.0,
    };

    for entry in transactions {
        let transaction = &entry.transaction;

        if !in_month(transaction, year, month) {
            continue;
        }

        if transaction.amount > 0.0 {
            totals.income += transaction.amount;
        } else if transaction.amount < 0.0 {
            totals.expenses += transaction.amount.abs();
        }
    }

    totals.net_balance = totals.income - totals.expenses;

    totals
}

/// Spending per category for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthComposition {
    /// The full month name, e.g. "January".
    pub month: &'static str,
    /// Total spending per category. Carries every category seen in the year,
    /// with zero for months where the category had no expenses.
    pub totals: BTreeMap<String, f64>,
}

/// Bucket the year's expenses by calendar month and category.
///
/// Returns all 12 months in calendar order regardless of the data. Each
/// month carries the full union of categories seen in the year, so a
/// category with no spending in some month reads as zero rather than being
/// absent.
pub fn category_composition(
    transactions: &[TransactionWithOwner],
    year: i32,
) -> Vec<MonthComposition> {
    let mut monthly_spending: Vec<BTreeMap<String, f64>> = vec![BTreeMap::new(); 12];
    let mut categories = BTreeSet::new();

    for entry in transactions {
        let transaction = &entry.transaction;

        if transaction.date.year() != year || transaction.amount >= 0.0 {
            continue;
        }

        let category = category_label(transaction).to_owned();
        categories.insert(category.clone());

        let month_index = transaction.date.month() as usize - 1;
        *monthly_spending[month_index].entry(category).or_insert(0.0) +=
            transaction.amount.abs();
    }

    monthly_spending
        .into_iter()
        .enumerate()
        .map(|(month_index, spending)| MonthComposition {
            month: MONTH_NAMES[month_index],
            totals: categories
                .iter()
                .map(|category| {
                    (
                        category.clone(),
                        spending.get(category).copied().unwrap_or(0.0),
                    )
                })
                .collect(),
        })
        .collect()
}

/// One user's private spending for a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSpending {
    /// The user's display name.
    pub name: String,
    /// Sum of the absolute values of the user's private expenses.
    pub total: f64,
}

/// Sum each user's private expenses for the given month.
///
/// Every user in `users` appears in the result, zero-filled when they had no
/// private spending; the order of `users` is preserved.
pub fn user_private_spending(
    transactions: &[TransactionWithOwner],
    users: &[User],
    year: i32,
    month: Month,
) -> Vec<UserSpending> {
    let mut spending: Vec<UserSpending> = users
        .iter()
        .map(|user| UserSpending {
            name: user.name.clone(),
            total: 0.0,
        })
        .collect();

    for entry in transactions {
        let transaction = &entry.transaction;

        if !in_month(transaction, year, month)
            || transaction.is_public
            || transaction.amount >= 0.0
        {
            continue;
        }

        if let Some(user_spending) = spending
            .iter_mut()
            .find(|user_spending| user_spending.name == entry.owner_name)
        {
            user_spending.total += transaction.amount.abs();
        }
    }

    spending
}

/// The five largest public expenses for the month, most expensive first.
///
/// Excluded categories are skipped so fixed recurring payments do not
/// dominate the list.
pub fn top_public_expenses(
    transactions: &[TransactionWithOwner],
    year: i32,
    month: Month,
    excluded_categories: &[String],
) -> Vec<TransactionWithOwner> {
    let mut expenses: Vec<TransactionWithOwner> = transactions
        .iter()
        .filter(|entry| {
            let transaction = &entry.transaction;

            in_month(transaction, year, month)
                && transaction.is_public
                && transaction.amount < 0.0
                && !excluded_categories
                    .iter()
                    .any(|excluded| excluded == category_label(transaction))
        })
        .cloned()
        .collect();

    expenses.sort_by(|a, b| a.transaction.amount.total_cmp(&b.transaction.amount));
    expenses.truncate(TOP_ENTRY_COUNT);

    expenses
}
