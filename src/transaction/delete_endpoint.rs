//! Defines the endpoint for deleting a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    auth::Viewer,
    transaction::core::{TransactionId, delete_transaction},
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Route handler for permanently deleting a transaction owned by the viewer.
///
/// Responds with the same not-found error for transactions owned by other
/// users and for IDs that do not exist.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Viewer(viewer): Viewer,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Value>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;
    delete_transaction(transaction_id, viewer, &connection)?;

    Ok(Json(json!({ "message": "Transaction deleted successfully" })))
}
