//! Month-over-month category trend analysis.

use serde::Serialize;
use time::Month;

use crate::{local_date::previous_month, transaction::TransactionWithOwner};

use super::{
    TOP_ENTRY_COUNT,
    aggregation::{category_label, in_month},
};

/// Minimum current-month spending for a category to qualify for the fastest
/// increasing list. Filters out huge percentage swings on near-zero
/// categories.
const MIN_TREND_SPENDING: f64 = 5.0;

/// A category's spending for the month compared with the previous month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTrend {
    /// The category name.
    pub category: String,
    /// Spending in the target month.
    pub amount: f64,
    /// Percentage change from the previous month. A category with no
    /// spending last month reads as 100, not infinity.
    pub change_percentage: f64,
    /// `amount` minus the previous month's spending.
    pub raw_change: f64,
}

/// Compare each category's spending with the previous calendar month.
///
/// Only categories with expense activity in the target month appear, and
/// `excluded_categories` are removed before anything is computed. Categories
/// keep the order in which they first appear in `transactions`, so the
/// equal-amount ties in the sorted views below are deterministic.
pub fn category_trends(
    transactions: &[TransactionWithOwner],
    year: i32,
    month: Month,
    excluded_categories: &[String],
) -> Vec<CategoryTrend> {
    let (previous_year, previous) = previous_month(year, month);

    let current_spending = spending_by_category(transactions, year, month, excluded_categories);
    let previous_spending =
        spending_by_category(transactions, previous_year, previous, excluded_categories);

    current_spending
        .into_iter()
        .map(|(category, amount)| {
            let previous_amount = previous_spending
                .iter()
                .find(|(previous_category, _)| *previous_category == category)
                .map(|(_, previous_amount)| *previous_amount)
                .unwrap_or(0.0);

            let change_percentage = if previous_amount > 0.0 {
                (amount - previous_amount) / previous_amount * 100.0
            } else if amount > 0.0 {
                // A category that did not exist last month reads as +100%.
                100.0
            } else {
                0.0
            };

            CategoryTrend {
                category,
                amount,
                change_percentage,
                raw_change: amount - previous_amount,
            }
        })
        .collect()
}

/// Sum expenses by category for one month, preserving the order in which
/// categories first appear in the ledger.
fn spending_by_category(
    transactions: &[TransactionWithOwner],
    year: i32,
    month: Month,
    excluded_categories: &[String],
) -> Vec<(String, f64)> {
    let mut spending: Vec<(String, f64)> = Vec::new();

    for entry in transactions {
        let transaction = &entry.transaction;
        let category = category_label(transaction);

        if !in_month(transaction, year, month)
            || transaction.amount >= 0.0
            || excluded_categories.iter().any(|excluded| excluded == category)
        {
            continue;
        }

        match spending.iter_mut().find(|(name, _)| name == category) {
            Some((_, amount)) => *amount += transaction.amount.abs(),
            None => spending.push((category.to_owned(), transaction.amount.abs())),
        }
    }

    spending
}

/// The five categories with the highest spending this month.
///
/// The sort is stable: equal amounts keep their first-appearance order.
pub fn top_spending_categories(trends: &[CategoryTrend]) -> Vec<CategoryTrend> {
    let mut sorted = trends.to_vec();
    sorted.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    sorted.truncate(TOP_ENTRY_COUNT);

    sorted
}

/// The five categories whose spending grew fastest since last month.
///
/// Categories below [MIN_TREND_SPENDING] this month are skipped; ties on the
/// percentage are broken by the higher amount.
pub fn fastest_increasing_categories(trends: &[CategoryTrend]) -> Vec<CategoryTrend> {
    let mut qualifying: Vec<CategoryTrend> = trends
        .iter()
        .filter(|trend| trend.amount >= MIN_TREND_SPENDING)
        .cloned()
        .collect();

    qualifying.sort_by(|a, b| {
        b.change_percentage
            .total_cmp(&a.change_percentage)
            .then(b.amount.total_cmp(&a.amount))
    });
    qualifying.truncate(TOP_ENTRY_COUNT);

    qualifying
}

/// The five categories whose spending shrank fastest since last month.
///
/// Only categories with a strictly negative change qualify; ties on the
/// percentage are broken by the higher amount.
pub fn fastest_decreasing_categories(trends: &[CategoryTrend]) -> Vec<CategoryTrend> {
    let mut qualifying: Vec<CategoryTrend> = trends
        .iter()
        .filter(|trend| trend.change_percentage < 0.0)
        .cloned()
        .collect();

    qualifying.sort_by(|a, b| {
        a.change_percentage
            .total_cmp(&b.change_percentage)
            .then(b.amount.total_cmp(&a.amount))
    });
    qualifying.truncate(TOP_ENTRY_COUNT);

    qualifying
}

#[cfg(test)]
mod trend_tests {
    use time::{
        Month,
        macros::{date, datetime},
    };

    use crate::{
        transaction::{Transaction, TransactionWithOwner},
        user::UserId,
    };

    use super::{
        CategoryTrend, category_trends, fastest_decreasing_categories,
        fastest_increasing_categories, top_spending_categories,
    };

    fn create_test_transaction(
        amount: f64,
        category: &str,
        date: time::Date,
    ) -> TransactionWithOwner {
        TransactionWithOwner {
            transaction: Transaction {
                id: 0,
                owner_id: UserId::new(1),
                description: "test".to_owned(),
                category: category.to_owned(),
                amount,
                date,
                is_public: true,
                created_at: datetime!(2024 - 06 - 01 0:00),
                updated_at: datetime!(2024 - 06 - 01 0:00),
            },
            owner_name: "Alice".to_owned(),
        }
    }

    fn trend(category: &str, amount: f64, change_percentage: f64) -> CategoryTrend {
        CategoryTrend {
            category: category.to_owned(),
            amount,
            change_percentage,
            raw_change: 0.0,
        }
    }

    #[test]
    fn compares_spending_with_the_previous_month() {
        let transactions = vec![
            create_test_transaction(-50.0, "Food", date!(2024 - 05 - 10)),
            create_test_transaction(-75.0, "Food", date!(2024 - 06 - 10)),
        ];

        let trends = category_trends(&transactions, 2024, Month::June, &[]);

        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].category, "Food");
        assert_eq!(trends[0].amount, 75.0);
        assert_eq!(trends[0].change_percentage, 50.0);
        assert_eq!(trends[0].raw_change, 25.0);
    }

    #[test]
    fn new_categories_read_as_one_hundred_percent() {
        let transactions = vec![create_test_transaction(-20.0, "Games", date!(2024 - 06 - 10))];

        let trends = category_trends(&transactions, 2024, Month::June, &[]);

        assert_eq!(trends[0].change_percentage, 100.0);
    }

    #[test]
    fn only_categories_with_current_month_activity_appear() {
        let transactions = vec![
            create_test_transaction(-50.0, "Food", date!(2024 - 05 - 10)),
            create_test_transaction(-20.0, "Games", date!(2024 - 06 - 10)),
        ];

        let trends = category_trends(&transactions, 2024, Month::June, &[]);

        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].category, "Games");
    }

    #[test]
    fn excluded_categories_are_removed_before_computation() {
        let excluded = vec!["Mortgage".to_owned()];
        let transactions = vec![
            create_test_transaction(-2000.0, "Mortgage", date!(2024 - 06 - 01)),
            create_test_transaction(-50.0, "Food", date!(2024 - 06 - 10)),
        ];

        let trends = category_trends(&transactions, 2024, Month::June, &excluded);

        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].category, "Food");
    }

    #[test]
    fn january_compares_against_december_of_the_previous_year() {
        let transactions = vec![
            create_test_transaction(-100.0, "Food", date!(2023 - 12 - 20)),
            create_test_transaction(-150.0, "Food", date!(2024 - 01 - 15)),
        ];

        let trends = category_trends(&transactions, 2024, Month::January, &[]);

        assert_eq!(trends[0].change_percentage, 50.0);
    }

    #[test]
    fn income_is_not_trend_activity() {
        let transactions = vec![create_test_transaction(2500.0, "Salary", date!(2024 - 06 - 15))];

        let trends = category_trends(&transactions, 2024, Month::June, &[]);

        assert!(trends.is_empty());
    }

    #[test]
    fn top_spending_takes_the_five_largest_with_stable_ties() {
        let trends = vec![
            trend("A", 10.0, 0.0),
            trend("B", 30.0, 0.0),
            trend("C", 10.0, 0.0),
            trend("D", 20.0, 0.0),
            trend("E", 5.0, 0.0),
            trend("F", 1.0, 0.0),
        ];

        let top = top_spending_categories(&trends);

        let names: Vec<&str> = top.iter().map(|trend| trend.category.as_str()).collect();
        // A and C are tied and keep their original relative order.
        assert_eq!(names, vec!["B", "D", "A", "C", "E"]);
    }

    #[test]
    fn fastest_increasing_applies_the_spending_floor() {
        let trends = vec![
            trend("Noise", 4.99, 400.0),
            trend("Food", 75.0, 50.0),
            trend("Games", 20.0, 100.0),
        ];

        let increasing = fastest_increasing_categories(&trends);

        let names: Vec<&str> = increasing
            .iter()
            .map(|trend| trend.category.as_str())
            .collect();
        assert_eq!(names, vec!["Games", "Food"]);
    }

    #[test]
    fn fastest_increasing_breaks_percentage_ties_by_amount() {
        let trends = vec![trend("Small", 10.0, 100.0), trend("Large", 50.0, 100.0)];

        let increasing = fastest_increasing_categories(&trends);

        assert_eq!(increasing[0].category, "Large");
        assert_eq!(increasing[1].category, "Small");
    }

    #[test]
    fn fastest_decreasing_only_includes_negative_changes() {
        let trends = vec![
            trend("Food", 75.0, 50.0),
            trend("Transport", 30.0, -25.0),
            trend("Games", 20.0, -75.0),
            trend("Flat", 10.0, 0.0),
        ];

        let decreasing = fastest_decreasing_categories(&trends);

        let names: Vec<&str> = decreasing
            .iter()
            .map(|trend| trend.category.as_str())
            .collect();
        assert_eq!(names, vec!["Games", "Transport"]);
    }

    #[test]
    fn fastest_decreasing_breaks_percentage_ties_by_amount() {
        let trends = vec![trend("Small", 10.0, -50.0), trend("Large", 50.0, -50.0)];

        let decreasing = fastest_decreasing_categories(&trends);

        assert_eq!(decreasing[0].category, "Large");
        assert_eq!(decreasing[1].category, "Small");
    }
}
