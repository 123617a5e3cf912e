use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Reuse the caller's request id or generate one
fn get_request_id(headers: &HeaderMap) -> String {
    headers
        .get(&REQUEST_ID)
        .and_then(|h| h.to_str().ok())
        .filter(|s| !s.is_empty() && s.len() <= 128)
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Logs one line per request and echoes the request id in the response
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = get_request_id(request.headers());

    let mut response = next.run(request).await;
    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID, header_value);
    }

    let duration = start.elapsed();
    let status = response.status();

    if status.is_server_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            duration_ms = duration.as_millis(),
            "request_completed_with_error"
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            duration_ms = duration.as_millis(),
            "request_completed"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, middleware, routing::get, Router};
    use tower::ServiceExt;

    #[test]
    fn test_request_id_generation() {
        let headers = HeaderMap::new();
        let request_id = get_request_id(&headers);
        assert!(Uuid::parse_str(&request_id).is_ok());
    }

    #[test]
    fn test_request_id_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID, HeaderValue::from_static("test-request-123"));
        assert_eq!(get_request_id(&headers), "test-request-123");
    }

    #[test]
    fn test_oversized_request_id_replaced() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID, HeaderValue::from_str(&"a".repeat(200)).unwrap());
        assert!(Uuid::parse_str(&get_request_id(&headers)).is_ok());
    }

    #[tokio::test]
    async fn test_response_echoes_request_id() {
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(middleware::from_fn(request_logging_middleware));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/ping")
                    .header("x-request-id", "existing-id-456")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()["x-request-id"], "existing-id-456");
    }
}
