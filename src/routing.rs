//! Application router configuration.

use axum::{
    Json, Router, middleware,
    routing::{get, post, put},
};
use serde_json::{Value, json};

use crate::{
    AppState,
    config::get_app_config_endpoint,
    csv_import::import_transactions_endpoint,
    endpoints,
    logging::logging_middleware,
    statistics::{composition_endpoint, monthly_report_endpoint, statistics_feed_endpoint},
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        list_transactions_endpoint,
    },
    user::get_users_endpoint,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(edit_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(endpoints::IMPORT, post(import_transactions_endpoint))
        .route(endpoints::STATISTICS, get(statistics_feed_endpoint))
        .route(endpoints::MONTHLY_REPORT, get(monthly_report_endpoint))
        .route(endpoints::CATEGORY_COMPOSITION, get(composition_endpoint))
        .route(endpoints::USERS, get(get_users_endpoint))
        .route(endpoints::APP_CONFIG, get(get_app_config_endpoint))
        .route(endpoints::HEALTH, get(get_health))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// Liveness probe for the fronting proxy.
async fn get_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
