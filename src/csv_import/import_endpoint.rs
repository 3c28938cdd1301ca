//! Defines the endpoint for importing transactions from an uploaded CSV
//! file.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Multipart, State, multipart::Field},
    http::StatusCode,
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    AppState, Error,
    auth::Viewer,
    csv_import::csv::{CsvParseResult, parse_csv},
    local_date::parse_local_date,
    transaction::{TransactionData, create_transaction},
    user::UserId,
};

/// The state needed for importing transactions.
#[derive(Debug, Clone)]
pub struct ImportState {
    /// The database connection for inserting transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ImportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// What happened to an import batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSummary {
    /// A human-readable summary line.
    pub message: String,
    /// How many rows were inserted.
    pub imported: usize,
    /// How many rows parsed successfully.
    pub total: usize,
    /// Parse and insert errors, in row order.
    pub errors: Vec<String>,
}

/// Route handler for importing transactions from an uploaded CSV file.
///
/// Rows that parse are inserted even when other rows fail; the summary lists
/// every row-level error alongside the number of rows that made it in.
pub async fn import_transactions_endpoint(
    State(state): State<ImportState>,
    Viewer(viewer): Viewer,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ImportSummary>), Error> {
    let field = multipart
        .next_field()
        .await
        .map_err(|error| Error::MultipartError(error.to_string()))?
        .ok_or(Error::NotCsv)?;
    let csv_text = read_csv_field(field).await?;

    let parse_result = parse_csv(&csv_text);

    if parse_result.transactions.is_empty() {
        let reason = if parse_result.errors.is_empty() {
            "no transaction rows found".to_owned()
        } else {
            parse_result.errors.join("; ")
        };

        return Err(Error::InvalidCsv(reason));
    }

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;
    let summary = import_parsed_transactions(viewer, parse_result, &connection)?;

    Ok((StatusCode::OK, Json(summary)))
}

/// Insert every parsed row inside one storage transaction.
///
/// Inserts are sequential and independent: a row that fails (e.g. a
/// syntactically shaped date that is not a real calendar date) is reported
/// without undoing earlier rows, and the batch still commits.
///
/// # Errors
/// Returns an [Error::SqlError] if the storage transaction itself cannot be
/// started or committed.
pub fn import_parsed_transactions(
    owner: UserId,
    parse_result: CsvParseResult,
    connection: &Connection,
) -> Result<ImportSummary, Error> {
    let tx = connection.unchecked_transaction()?;

    let total = parse_result.transactions.len();
    let mut errors = parse_result.errors;
    let mut imported = 0;

    for (index, row) in parse_result.transactions.into_iter().enumerate() {
        let result = parse_local_date(&row.date).and_then(|date| {
            create_transaction(
                owner,
                TransactionData {
                    description: row.description,
                    category: row.category,
                    amount: row.amount,
                    date,
                    is_public: row.is_public,
                },
                &tx,
            )
        });

        match result {
            Ok(_) => imported += 1,
            Err(error) => errors.push(format!("Transaction {}: {error}", index + 1)),
        }
    }

    tx.commit()?;

    Ok(ImportSummary {
        message: format!("Successfully imported {imported} transactions"),
        imported,
        total,
        errors,
    })
}

/// Read one multipart field, checking that it looks like a CSV file.
async fn read_csv_field(field: Field<'_>) -> Result<String, Error> {
    let is_csv_content_type = field
        .content_type()
        .is_some_and(|content_type| content_type == "text/csv");
    let has_csv_extension = field
        .file_name()
        .is_some_and(|file_name| file_name.to_lowercase().ends_with(".csv"));

    if !is_csv_content_type && !has_csv_extension {
        return Err(Error::NotCsv);
    }

    field
        .text()
        .await
        .map_err(|error| Error::MultipartError(error.to_string()))
}
