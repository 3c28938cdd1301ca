//! Implements a struct that holds the state of the API server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, config::AppConfig, db::initialize};

/// The state of the API server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The application config loaded at startup.
    pub config: Arc<AppConfig>,

    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for
    /// the domain models and seeding the user table from `config`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, config: AppConfig) -> Result<Self, Error> {
        initialize(&db_connection, &config)?;

        Ok(Self {
            config: Arc::new(config),
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}
