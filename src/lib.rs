//! Cofi is a finance tracker for households where several people share one
//! ledger.
//!
//! Each member records income and expenses and marks every entry private or
//! public. Other members only ever see public entries, while the statistics
//! views deliberately aggregate the whole household ledger so the numbers
//! are the same for everyone. This library provides the JSON REST API over
//! that core: the transaction lifecycle and ownership rules, the visibility
//! model, CSV ingestion and the statistics aggregation engine.
//!
//! Authentication is out of scope: a fronting auth layer identifies the
//! caller and passes the user ID along with each request.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod auth;
mod config;
mod csv_import;
mod db;
pub mod endpoints;
mod error;
mod local_date;
mod logging;
mod routing;
mod statistics;
mod transaction;
mod user;
mod visibility;

pub use app_state::AppState;
pub use config::{AppConfig, load_config};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down
/// gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
