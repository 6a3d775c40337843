//! HTTP Middleware
//!
//! 记录非 200 的 HTTP 状态（如请求体解析失败、超出大小限制）

use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use std::time::Instant;

/// HTTP 状态码错误日志中间件
///
/// 业务错误（errno != 0）以 HTTP 200 返回，在 ApiError::into_response() 中记录；
/// 这里只覆盖 axum 提取器等在进入业务层之前产生的 4xx/5xx
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP server error"
        );
    } else if status == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!(
            method = %method,
            path = %path,
            elapsed_ms,
            "Request body exceeds limit"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP client error"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        extract::DefaultBodyLimit,
        http::{header::CONTENT_TYPE, Request as HttpRequest},
        routing::post,
        Json, Router,
    };
    use serde::Deserialize;
    use tower::util::ServiceExt;

    #[derive(Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        title: String,
    }

    async fn accept(Json(_): Json<Payload>) -> &'static str {
        "OK"
    }

    fn create_test_router() -> Router {
        Router::new()
            .route("/chapter", post(accept))
            .layer(DefaultBodyLimit::max(64))
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    fn json_request(body: String) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method("POST")
            .uri("/chapter")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_request_passes_through() {
        let response = create_test_router()
            .oneshot(json_request(r#"{"title":"第一章"}"#.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_body_is_client_error() {
        let response = create_test_router()
            .oneshot(json_request(r#"{"name":1}"#.to_string()))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let body = format!(r#"{{"title":"{}"}}"#, "x".repeat(200));
        let response = create_test_router()
            .oneshot(json_request(body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
