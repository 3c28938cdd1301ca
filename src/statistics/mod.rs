//! Turning the raw transaction ledger into financial summaries.
//!
//! All aggregation here is pure: functions take a slice of owner-joined
//! transactions plus a target period and never touch the database or mutate
//! their input.

mod aggregation;
mod composition_endpoint;
mod feed_endpoint;
mod monthly_report_endpoint;
mod trend;

pub use aggregation::{
    MonthComposition, MonthlyTotals, UNCATEGORIZED_LABEL, UserSpending, category_composition,
    monthly_totals, top_public_expenses, user_private_spending,
};
pub use composition_endpoint::composition_endpoint;
pub use feed_endpoint::statistics_feed_endpoint;
pub use monthly_report_endpoint::{MonthlyReport, monthly_report_endpoint};
pub use trend::{
    CategoryTrend, category_trends, fastest_decreasing_categories, fastest_increasing_categories,
    top_spending_categories,
};

/// The number of entries shown in each "top five" list.
const TOP_ENTRY_COUNT: usize = 5;
