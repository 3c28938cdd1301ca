//! Defines the app level error type and its conversion to JSON API responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request did not carry a valid viewer identity.
    ///
    /// The fronting auth layer injects the signed-in user's ID as a header
    /// on every request it lets through; a missing or malformed value means
    /// the request never passed authentication.
    #[error("the request does not identify a signed-in user")]
    Unauthorized,

    /// An empty or whitespace-only description was used for a transaction.
    #[error("transaction descriptions must not be empty")]
    EmptyDescription,

    /// An empty or whitespace-only category was used for a transaction.
    #[error("transaction categories must not be empty")]
    EmptyCategory,

    /// A NaN or infinite amount was used for a transaction.
    #[error("{0} is not a valid transaction amount")]
    InvalidAmount(f64),

    /// A date string that does not name a calendar date in `YYYY-MM-DD` form.
    #[error("\"{0}\" is not a calendar date in YYYY-MM-DD form")]
    InvalidDate(String),

    /// A month number outside 1-12.
    #[error("{0} is not a calendar month")]
    InvalidMonth(u8),

    /// The requested transaction does not exist, or belongs to another user.
    ///
    /// The two cases deliberately share one variant so that responses never
    /// reveal whether somebody else's transaction exists.
    #[error("the transaction could not be found")]
    TransactionNotFound,

    /// The multipart form could not be parsed.
    #[error("could not parse multipart form: {0}")]
    MultipartError(String),

    /// The uploaded file is not a CSV file.
    #[error("file is not a CSV")]
    NotCsv,

    /// The CSV had issues that prevented any rows from being imported.
    #[error("could not parse the CSV file: {0}")]
    InvalidCsv(String),

    /// The application config file could not be read or parsed.
    #[error("invalid config file: {0}")]
    InvalidConfig(String),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::TransactionNotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::EmptyDescription
            | Error::EmptyCategory
            | Error::InvalidAmount(_)
            | Error::InvalidDate(_)
            | Error::InvalidMonth(_)
            | Error::MultipartError(_)
            | Error::NotCsv
            | Error::InvalidCsv(_) => StatusCode::BAD_REQUEST,
            Error::TransactionNotFound => StatusCode::NOT_FOUND,
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Internal details are only for the server logs.
        let message = if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            "An unexpected error occurred, check the server logs for more details.".to_owned()
        } else {
            self.to_string()
        };

        (status_code, Json(json!({ "message": message }))).into_response()
    }
}
