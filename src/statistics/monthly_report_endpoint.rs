//! Defines the endpoint serving the server-computed monthly report.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Month;

use crate::{
    AppState, Error,
    auth::Viewer,
    config::AppConfig,
    statistics::{
        CategoryTrend, MonthlyTotals, UserSpending, category_trends,
        fastest_decreasing_categories, fastest_increasing_categories, monthly_totals,
        top_public_expenses, top_spending_categories, user_private_spending,
    },
    transaction::{TransactionWithOwner, get_all_transactions},
    user::get_users,
};

/// The state needed for the monthly report.
#[derive(Debug, Clone)]
pub struct MonthlyReportState {
    /// The database connection for reading transactions and users.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The application config, for the trend exclusion list.
    pub config: Arc<AppConfig>,
}

impl FromRef<AppState> for MonthlyReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            config: state.config.clone(),
        }
    }
}

/// Query parameters selecting the report month.
#[derive(Debug, Deserialize)]
pub struct ReportPeriod {
    /// The calendar year, e.g. 2024.
    pub year: i32,
    /// The calendar month, 1-12.
    pub month: u8,
}

/// The monthly report for the whole household.
#[derive(Debug, Serialize)]
pub struct MonthlyReport {
    /// Income, expenses and net balance for the month.
    pub totals: MonthlyTotals,
    /// Private spending per user, zero-filled for users with none.
    pub private_spending: Vec<UserSpending>,
    /// The five categories with the highest spending.
    pub top_spending_categories: Vec<CategoryTrend>,
    /// The five categories growing fastest since last month.
    pub fastest_increasing: Vec<CategoryTrend>,
    /// The five categories shrinking fastest since last month.
    pub fastest_decreasing: Vec<CategoryTrend>,
    /// The five largest public expenses.
    pub top_public_expenses: Vec<TransactionWithOwner>,
}

/// Route handler that computes the monthly report over the whole ledger.
pub async fn monthly_report_endpoint(
    State(state): State<MonthlyReportState>,
    Viewer(_viewer): Viewer,
    Query(period): Query<ReportPeriod>,
) -> Result<Json<MonthlyReport>, Error> {
    let month = Month::try_from(period.month).map_err(|_| Error::InvalidMonth(period.month))?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;
    let transactions = get_all_transactions(&connection)?;
    let users = get_users(&connection)?;
    drop(connection);

    let excluded = &state.config.excluded_categories;
    let trends = category_trends(&transactions, period.year, month, excluded);

    Ok(Json(MonthlyReport {
        totals: monthly_totals(&transactions, period.year, month),
        private_spending: user_private_spending(&transactions, &users, period.year, month),
        top_spending_categories: top_spending_categories(&trends),
        fastest_increasing: fastest_increasing_categories(&trends),
        fastest_decreasing: fastest_decreasing_categories(&trends),
        top_public_expenses: top_public_expenses(&transactions, period.year, month, excluded),
    }))
}
