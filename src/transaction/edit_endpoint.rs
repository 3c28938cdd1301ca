//! Defines the endpoint for updating an existing transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    auth::Viewer,
    local_date::parse_local_date,
    transaction::core::{Transaction, TransactionData, TransactionId, update_transaction},
};

/// The state needed to update a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The JSON body for updating a transaction.
///
/// Every field is required: an update is a full replacement of the editable
/// fields. The owner is taken from the request identity and cannot appear
/// here.
#[derive(Debug, Deserialize)]
pub struct UpdateTransactionForm {
    /// Text detailing the transaction.
    pub description: String,
    /// The category of the transaction.
    pub category: String,
    /// The value of the transaction in dollars.
    pub amount: f64,
    /// The date when the transaction occurred, in `YYYY-MM-DD` form.
    pub date: String,
    /// Whether other household members can see this transaction.
    pub is_public: bool,
}

/// Route handler for updating a transaction owned by the viewer.
///
/// Responds with the same not-found error for transactions owned by other
/// users and for IDs that do not exist.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Viewer(viewer): Viewer,
    Path(transaction_id): Path<TransactionId>,
    Json(form): Json<UpdateTransactionForm>,
) -> Result<Json<Transaction>, Error> {
    let data = TransactionData {
        description: form.description,
        category: form.category,
        amount: form.amount,
        date: parse_local_date(&form.date)?,
        is_public: form.is_public,
    };

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;
    let transaction = update_transaction(transaction_id, viewer, data, &connection)?;

    Ok(Json(transaction))
}
