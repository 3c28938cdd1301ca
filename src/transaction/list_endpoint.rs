//! Defines the endpoint that lists the transactions visible to the viewer.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::Viewer,
    transaction::core::get_transactions_for_viewer,
    visibility::{AnnotatedTransaction, resolve_visible},
};

/// The state needed for listing transactions.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Route handler that lists the viewer's own transactions plus every public
/// one, newest first, annotated with ownership.
pub async fn list_transactions_endpoint(
    State(state): State<ListTransactionsState>,
    Viewer(viewer): Viewer,
) -> Result<Json<Vec<AnnotatedTransaction>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;
    let transactions = get_transactions_for_viewer(viewer, &connection)?;

    Ok(Json(resolve_visible(viewer, &transactions)))
}
