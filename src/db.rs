//! Database setup for the application.

use rusqlite::Connection;

use crate::{
    Error,
    config::AppConfig,
    transaction::create_transaction_table,
    user::{create_user_table, sync_users},
};

/// Create the application tables and seed the user table from `config`.
///
/// Safe to call on every startup, existing tables and rows are left alone.
///
/// # Errors
/// Returns an error if a table cannot be created or seeded.
pub fn initialize(connection: &Connection, config: &AppConfig) -> Result<(), Error> {
    create_user_table(connection)?;
    create_transaction_table(connection)?;
    sync_users(&config.users, connection)?;

    Ok(())
}
