//! Defines the endpoint serving the statistics feed.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::Viewer,
    transaction::get_all_transactions,
    visibility::{AnnotatedTransaction, resolve_all},
};

/// The state needed for the statistics feed.
#[derive(Debug, Clone)]
pub struct StatisticsFeedState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for StatisticsFeedState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Route handler that returns every transaction from every owner, regardless
/// of visibility, annotated with ownership.
///
/// Statistics must be consistent for the whole household, so the privacy
/// flag is deliberately ignored here.
pub async fn statistics_feed_endpoint(
    State(state): State<StatisticsFeedState>,
    Viewer(viewer): Viewer,
) -> Result<Json<Vec<AnnotatedTransaction>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;
    let transactions = get_all_transactions(&connection)?;

    Ok(Json(resolve_all(viewer, &transactions)))
}
