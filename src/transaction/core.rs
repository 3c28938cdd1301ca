//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::Serialize;
use time::{Date, PrimitiveDateTime};

use crate::{Error, user::UserId};

// ============================================================================
// MODELS
// ============================================================================

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

/// An expense or income recorded by one household member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The ID of the user that recorded the transaction. Never changes once
    /// the row exists.
    pub owner_id: UserId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category of the transaction, e.g. "Groceries", "Rent". Advisory,
    /// any non-empty string is accepted.
    pub category: String,
    /// The amount of money spent or earned in this transaction.
    ///
    /// Positive values are income, negative values are expenses. Zero is
    /// allowed and counts as neither.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// Whether other household members can see this transaction.
    pub is_public: bool,
    /// When the row was inserted. Assigned by the database.
    pub created_at: PrimitiveDateTime,
    /// When the row was last changed. Assigned by the database.
    pub updated_at: PrimitiveDateTime,
}

/// A transaction joined with its owner's display name, as returned by the
/// ledger queries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionWithOwner {
    /// The transaction itself.
    #[serde(flatten)]
    pub transaction: Transaction,
    /// The display name of the user that owns the transaction.
    pub owner_name: String,
}

/// The caller-editable fields of a transaction.
///
/// Used for both creating and (full-replacement) updating. The owner is
/// always passed separately and can never be changed through an update.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionData {
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category of the transaction.
    pub category: String,
    /// The amount of money spent or earned.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// Whether other household members can see this transaction.
    pub is_public: bool,
}

impl TransactionData {
    /// Check the field shape rules: non-empty description and category after
    /// trimming, and a finite amount.
    ///
    /// # Errors
    /// Returns [Error::EmptyDescription], [Error::EmptyCategory] or
    /// [Error::InvalidAmount].
    pub fn validate(&self) -> Result<(), Error> {
        if self.description.trim().is_empty() {
            return Err(Error::EmptyDescription);
        }

        if self.category.trim().is_empty() {
            return Err(Error::EmptyCategory);
        }

        if !self.amount.is_finite() {
            return Err(Error::InvalidAmount(self.amount));
        }

        Ok(())
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

const TRANSACTION_COLUMNS: &str =
    "id, owner_id, description, category, amount, date, is_public, created_at, updated_at";

/// Create a new transaction owned by `owner`.
///
/// # Errors
/// This function will return a:
/// - validation error from [TransactionData::validate],
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    owner: UserId,
    data: TransactionData,
    connection: &Connection,
) -> Result<Transaction, Error> {
    data.validate()?;

    let transaction = connection
        .prepare(&format!(
            "INSERT INTO \"transaction\" (owner_id, description, category, amount, date, is_public)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING {TRANSACTION_COLUMNS}"
        ))?
        .query_row(
            (
                owner.as_i64(),
                &data.description,
                &data.category,
                data.amount,
                data.date,
                data.is_public,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Replace the caller-editable fields of the transaction with `id`.
///
/// The update only applies when the transaction exists AND belongs to
/// `owner`. Both failure cases produce the same [Error::TransactionNotFound]
/// so callers cannot probe for other users' transactions. The owner itself
/// is never updated.
///
/// # Errors
/// This function will return a:
/// - validation error from [TransactionData::validate],
/// - [Error::TransactionNotFound] if `id` does not refer to a transaction
///   owned by `owner`,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    owner: UserId,
    data: TransactionData,
    connection: &Connection,
) -> Result<Transaction, Error> {
    data.validate()?;

    let rows_affected = connection.execute(
        "UPDATE \"transaction\"
         SET description = ?1, category = ?2, amount = ?3, date = ?4, is_public = ?5,
             updated_at = CURRENT_TIMESTAMP
         WHERE id = ?6 AND owner_id = ?7",
        (
            &data.description,
            &data.category,
            data.amount,
            data.date,
            data.is_public,
            id,
            owner.as_i64(),
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::TransactionNotFound);
    }

    get_transaction(id, connection)
}

/// Delete the transaction with `id`.
///
/// Deletion is immediate and permanent. The same ownership rule and merged
/// error as [update_transaction] apply.
///
/// # Errors
/// This function will return a:
/// - [Error::TransactionNotFound] if `id` does not refer to a transaction
///   owned by `owner`,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_transaction(
    id: TransactionId,
    owner: UserId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = ?1 AND owner_id = ?2",
        (id, owner.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::TransactionNotFound);
    }

    Ok(())
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::TransactionNotFound] if `id` does not refer to a valid
///   transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" WHERE id = :id"
        ))?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

const SELECT_WITH_OWNER: &str = "SELECT t.id, t.owner_id, t.description, t.category, t.amount, \
     t.date, t.is_public, t.created_at, t.updated_at, u.name \
     FROM \"transaction\" t \
     JOIN user u ON t.owner_id = u.id";

/// Retrieve the transactions `viewer` may see: their own plus every public
/// one, newest first.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_transactions_for_viewer(
    viewer: UserId,
    connection: &Connection,
) -> Result<Vec<TransactionWithOwner>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_WITH_OWNER} WHERE t.owner_id = :owner OR t.is_public = 1 \
             ORDER BY t.date DESC, t.created_at DESC"
        ))?
        .query_map(
            &[(":owner", &viewer.as_i64())],
            map_transaction_with_owner_row,
        )?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
        .collect()
}

/// Retrieve every transaction from every owner, newest first.
///
/// This is the statistics feed: it ignores the privacy flag so that the
/// numbers are the same for every household member.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<TransactionWithOwner>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_WITH_OWNER} ORDER BY t.date DESC, t.created_at DESC"
        ))?
        .query_map([], map_transaction_with_owner_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
        .collect()
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL
/// error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                owner_id INTEGER NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                is_public INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY(owner_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    // Index used by the viewer and statistics queries.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_owner_date ON \"transaction\"(owner_id, date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a [Transaction].
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        owner_id: UserId::new(row.get(1)?),
        description: row.get(2)?,
        category: row.get(3)?,
        amount: row.get(4)?,
        date: row.get(5)?,
        is_public: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

/// Map a database row from the owner-joined queries to a
/// [TransactionWithOwner].
fn map_transaction_with_owner_row(row: &Row) -> Result<TransactionWithOwner, rusqlite::Error> {
    Ok(TransactionWithOwner {
        transaction: map_transaction_row(row)?,
        owner_name: row.get(9)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
