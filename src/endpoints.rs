//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g.
//! '/api/transactions/{transaction_id}', use [format_endpoint].

/// The route to list or create transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to update or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to upload CSV files for importing transactions.
pub const IMPORT: &str = "/api/transactions/import";
/// The route for the statistics feed: every transaction regardless of
/// visibility.
pub const STATISTICS: &str = "/api/statistics";
/// The route for the server-computed monthly report.
pub const MONTHLY_REPORT: &str = "/api/statistics/monthly";
/// The route for the yearly category composition.
pub const CATEGORY_COMPOSITION: &str = "/api/statistics/categories";
/// The route to list users.
pub const USERS: &str = "/api/users";
/// The route serving the advisory category list and user names to the UI.
pub const APP_CONFIG: &str = "/api/app-config";
/// The liveness probe.
pub const HEALTH: &str = "/api/health";

/// Replace the `{...}` parameter in `endpoint_path` with `id`.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original path unchanged.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    match (endpoint_path.find('{'), endpoint_path.rfind('}')) {
        (Some(start), Some(end)) if start < end => {
            format!(
                "{}{id}{}",
                &endpoint_path[..start],
                &endpoint_path[end + 1..]
            )
        }
        _ => endpoint_path.to_owned(),
    }
}

#[cfg(test)]
mod endpoints_tests {
    use super::{TRANSACTION, format_endpoint};

    #[test]
    fn formats_the_parameter() {
        assert_eq!(format_endpoint(TRANSACTION, 42), "/api/transactions/42");
    }

    #[test]
    fn returns_paths_without_parameters_unchanged() {
        assert_eq!(format_endpoint("/api/transactions", 42), "/api/transactions");
    }
}
