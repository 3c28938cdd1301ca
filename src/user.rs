//! Code for creating the user table, seeding it from the config file, and
//! listing users.

use std::{
    fmt::Display,
    sync::{Arc, Mutex},
};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, config::ConfigUser};

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to
/// better compile time errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A household member.
///
/// Users are seeded from the config file at startup; credentials live
/// entirely in the fronting auth layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserId,
    /// The user's display name.
    pub name: String,
}

/// Create the user table.
///
/// # Errors
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
                )",
        (),
    )?;

    Ok(())
}

/// Insert the users from the config file that are not yet in the database.
///
/// Existing rows keep their IDs so transactions stay attached to their owner
/// across restarts.
///
/// # Errors
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn sync_users(users: &[ConfigUser], connection: &Connection) -> Result<(), Error> {
    for user in users {
        connection.execute("INSERT OR IGNORE INTO user (name) VALUES (?1)", (&user.name,))?;
    }

    Ok(())
}

/// Retrieve every user, ordered by display name.
///
/// # Errors
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn get_users(connection: &Connection) -> Result<Vec<User>, Error> {
    connection
        .prepare("SELECT id, name FROM user ORDER BY name ASC")?
        .query_map([], |row| {
            Ok(User {
                id: UserId::new(row.get(0)?),
                name: row.get(1)?,
            })
        })?
        .map(|maybe_user| maybe_user.map_err(Error::SqlError))
        .collect()
}

/// The state needed for listing users.
#[derive(Debug, Clone)]
pub struct UserListState {
    /// The database connection for reading users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UserListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Route handler that lists every user's ID and display name.
///
/// Never returns anything beyond the public identity fields.
pub async fn get_users_endpoint(
    State(state): State<UserListState>,
) -> Result<Json<Vec<User>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    Ok(Json(get_users(&connection)?))
}
