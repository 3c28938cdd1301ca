//! Defines the endpoint for recording a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    auth::Viewer,
    local_date::parse_local_date,
    transaction::core::{Transaction, TransactionData, create_transaction},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The JSON body for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// Text detailing the transaction.
    pub description: String,
    /// The category of the transaction.
    pub category: String,
    /// The value of the transaction in dollars.
    pub amount: f64,
    /// The date when the transaction occurred, in `YYYY-MM-DD` form.
    pub date: String,
    /// Whether other household members can see this transaction.
    /// Interactive creation defaults to public.
    #[serde(default = "default_is_public")]
    pub is_public: bool,
}

fn default_is_public() -> bool {
    true
}

impl TransactionForm {
    /// Convert the raw form into validated transaction fields.
    ///
    /// # Errors
    /// Returns [Error::InvalidDate] if the date is not a calendar date in
    /// `YYYY-MM-DD` form.
    pub(crate) fn into_data(self) -> Result<TransactionData, Error> {
        let date = parse_local_date(&self.date)?;

        Ok(TransactionData {
            description: self.description,
            category: self.category,
            amount: self.amount,
            date,
            is_public: self.is_public,
        })
    }
}

/// Route handler for recording a new transaction owned by the viewer.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Viewer(viewer): Viewer,
    Json(form): Json<TransactionForm>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    let data = form.into_data()?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;
    let transaction = create_transaction(viewer, data, &connection)?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, extract::State};
    use rusqlite::Connection;

    use crate::{
        Error,
        auth::Viewer,
        config::{AppConfig, ConfigUser},
        db::initialize,
        user::UserId,
    };

    use super::{CreateTransactionState, TransactionForm, create_transaction_endpoint};

    fn get_test_state() -> CreateTransactionState {
        let conn = Connection::open_in_memory().unwrap();
        let config = AppConfig {
            users: vec![ConfigUser {
                name: "Alice".to_owned(),
            }],
            predefined_categories: vec![],
            excluded_categories: vec![],
        };
        initialize(&conn, &config).unwrap();

        CreateTransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    fn coffee_form() -> TransactionForm {
        TransactionForm {
            description: "Coffee".to_owned(),
            category: "Food".to_owned(),
            amount: -4.50,
            date: "2024-03-01".to_owned(),
            is_public: true,
        }
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let state = get_test_state();

        let (_, Json(transaction)) = create_transaction_endpoint(
            State(state),
            Viewer(UserId::new(1)),
            Json(coffee_form()),
        )
        .await
        .unwrap();

        assert_eq!(transaction.owner_id, UserId::new(1));
        assert_eq!(transaction.description, "Coffee");
        assert_eq!(transaction.amount, -4.50);
        assert!(transaction.is_public);
    }

    #[tokio::test]
    async fn rejects_invalid_dates() {
        let state = get_test_state();
        let mut form = coffee_form();
        form.date = "2024-13-40".to_owned();

        let result =
            create_transaction_endpoint(State(state), Viewer(UserId::new(1)), Json(form)).await;

        assert_eq!(
            result.err(),
            Some(Error::InvalidDate("2024-13-40".to_owned()))
        );
    }

    #[test]
    fn omitted_visibility_defaults_to_public() {
        let form: TransactionForm = serde_json::from_str(
            r#"{
                "description": "Coffee",
                "category": "Food",
                "amount": -4.50,
                "date": "2024-03-01"
            }"#,
        )
        .unwrap();

        assert!(form.is_public);
    }
}
