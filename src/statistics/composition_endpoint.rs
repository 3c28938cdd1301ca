//! Defines the endpoint serving the yearly category composition.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    auth::Viewer,
    statistics::{MonthComposition, category_composition},
    transaction::get_all_transactions,
};

/// The state needed for the category composition.
#[derive(Debug, Clone)]
pub struct CompositionState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CompositionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Query parameters selecting the composition year.
#[derive(Debug, Deserialize)]
pub struct CompositionPeriod {
    /// The calendar year, e.g. 2024.
    pub year: i32,
}

/// Route handler that buckets the year's expenses by month and category.
pub async fn composition_endpoint(
    State(state): State<CompositionState>,
    Viewer(_viewer): Viewer,
    Query(period): Query<CompositionPeriod>,
) -> Result<Json<Vec<MonthComposition>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;
    let transactions = get_all_transactions(&connection)?;

    Ok(Json(category_composition(&transactions, period.year)))
}
