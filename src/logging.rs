//! Middleware for logging requests and responses.

use axum::{body::Body, extract::Request, middleware::Next, response::Response};

/// The maximum number of body bytes included in an `info` level log line.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level. Bodies
/// longer than [LOG_BODY_LENGTH_LIMIT] bytes are truncated, with the full
/// body logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    log_payload(
        "Received request",
        &format!("{} {}", parts.method, parts.uri),
        &String::from_utf8_lossy(&body_bytes),
    );

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    log_payload(
        "Sending response",
        &parts.status.to_string(),
        &String::from_utf8_lossy(&body_bytes),
    );

    Response::from_parts(parts, Body::from(body_bytes))
}

fn log_payload(direction: &str, summary: &str, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        let truncated: String = body.chars().take(LOG_BODY_LENGTH_LIMIT).collect();
        tracing::info!("{direction}: {summary} body: {truncated}...");
        tracing::debug!("{direction}: {summary} full body: {body:?}");
    } else {
        tracing::info!("{direction}: {summary} body: {body:?}");
    }
}
