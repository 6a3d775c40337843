//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::Router;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::error_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;

/// 请求体上限
///
/// 章节正文最多 1,000,000 字符，UTF-8 下每字符最多 4 字节，另留 JSON 转义余量
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 构建完整 Router（含中间件）
pub fn build_router(state: Arc<AppState>) -> Router {
    // CORS 配置 - 允许所有来源的跨域请求
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600));

    create_routes(state.jwt_verifier.clone())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(error_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = build_router(self.state);
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;
    use uuid::Uuid;

    use crate::domain::chapter::NewChapter;
    use crate::infrastructure::auth::jwt::test_tokens::{valid_token, TEST_SECRET};
    use crate::infrastructure::auth::JwtVerifier;
    use crate::test_support::{other_user, TestContext};

    async fn setup() -> (Router, TestContext) {
        let ctx = TestContext::new().await;
        let state = AppState::new(
            ctx.chapter_repo.clone(),
            ctx.project_repo.clone(),
            ctx.locks.clone(),
            ctx.aggregator.clone(),
            Arc::new(JwtVerifier::new(TEST_SECRET).unwrap()),
        );
        (build_router(Arc::new(state)), ctx)
    }

    async fn call(
        router: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_ping_needs_no_token() {
        let (router, _ctx) = setup().await;

        let (status, body) = call(&router, "GET", "/api/ping", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "ainovel");
    }

    #[tokio::test]
    async fn test_missing_token_is_errno_401() {
        let (router, _ctx) = setup().await;

        let (status, body) = call(&router, "GET", "/api/project/list", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["errno"], 401);
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_project_and_chapter_flow() {
        let (router, ctx) = setup().await;
        let token = valid_token(&ctx.user.to_string());
        let token = Some(token.as_str());

        let (_, body) = call(
            &router,
            "POST",
            "/api/project/create",
            token,
            Some(json!({ "name": "斗破苍穹" })),
        )
        .await;
        assert_eq!(body["errno"], 0);
        let project_id = body["data"]["id"].as_str().unwrap().to_string();

        let mut chapter_ids = Vec::new();
        for (title, content) in [("第一章", "你好世界"), ("第二章", "hello world")] {
            let (_, body) = call(
                &router,
                "POST",
                "/api/chapter/create",
                token,
                Some(json!({ "project_id": project_id, "title": title, "content": content })),
            )
            .await;
            assert_eq!(body["errno"], 0);
            assert_eq!(body["data"]["status"], "draft");
            chapter_ids.push(body["data"]["id"].as_str().unwrap().to_string());
        }

        let missing = Uuid::new_v4().to_string();
        let (_, body) = call(
            &router,
            "POST",
            "/api/chapter/batch_publish",
            token,
            Some(json!({ "project_id": project_id, "chapter_ids": [chapter_ids[0], missing] })),
        )
        .await;
        assert_eq!(body["errno"], 0);
        let result = &body["data"];
        assert_eq!(result["success"], false);
        assert_eq!(result["total_count"], 2);
        assert_eq!(result["success_count"], 1);
        assert_eq!(result["published_chapters"][0]["id"], chapter_ids[0].as_str());
        assert_eq!(result["failed_chapters"][0]["id"], missing.as_str());

        let (_, body) = call(
            &router,
            "POST",
            "/api/project/get",
            token,
            Some(json!({ "id": project_id })),
        )
        .await;
        assert_eq!(body["data"]["word_count"], 4);
        assert_eq!(body["data"]["chapter_count"], 1);

        let (_, body) = call(
            &router,
            "POST",
            "/api/chapter/unpublished",
            token,
            Some(json!({ "project_id": project_id, "current_chapter_id": chapter_ids[1] })),
        )
        .await;
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["chapters"][0]["id"], chapter_ids[1].as_str());
        assert_eq!(body["data"]["chapters"][0]["is_current"], true);
    }

    #[tokio::test]
    async fn test_foreign_project_is_errno_403() {
        let (router, ctx) = setup().await;
        let project = ctx.create_project("私有").await;
        let intruder = valid_token(&other_user().to_string());

        let (status, body) = call(
            &router,
            "POST",
            "/api/chapter/list",
            Some(intruder.as_str()),
            Some(json!({ "project_id": project.id })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["errno"], 403);
    }

    #[tokio::test]
    async fn test_invalid_status_is_errno_400() {
        let (router, ctx) = setup().await;
        let project = ctx.create_project("状态").await;
        let token = valid_token(&ctx.user.to_string());

        let (_, body) = call(
            &router,
            "POST",
            "/api/chapter/batch_status",
            Some(token.as_str()),
            Some(json!({ "project_id": project.id, "from_order_index": 1, "status": "archived" })),
        )
        .await;

        assert_eq!(body["errno"], 400);
    }

    #[tokio::test]
    async fn test_update_project_renames() {
        let (router, ctx) = setup().await;
        let project = ctx.create_project("旧名").await;
        let token = valid_token(&ctx.user.to_string());

        let (status, body) = call(
            &router,
            "POST",
            "/api/project/update",
            Some(token.as_str()),
            Some(json!({ "id": project.id, "name": "新名" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["name"], "新名");
        assert_eq!(ctx.project(project.id).await.name, "新名");
    }

    #[tokio::test]
    async fn test_batch_publish_malformed_id_is_item_failure() {
        let (router, ctx) = setup().await;
        let project = ctx.create_project("批量").await;
        let chapter = NewChapter::new("第一章", Some("你好世界".to_string()), None).unwrap();
        let chapter = ctx.chapter_repo.create(project.id, &chapter).await.unwrap();
        let token = valid_token(&ctx.user.to_string());

        let (status, body) = call(
            &router,
            "POST",
            "/api/chapter/batch_publish",
            Some(token.as_str()),
            Some(json!({ "project_id": project.id, "chapter_ids": ["bogus", chapter.id] })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["errno"], 0);
        let result = &body["data"];
        assert_eq!(result["total_count"], 2);
        assert_eq!(result["success_count"], 1);
        assert_eq!(result["failed_chapters"][0]["id"], "bogus");
        assert_eq!(result["failed_chapters"][0]["reason"], "invalid chapter id");
        assert_eq!(result["published_chapters"][0]["id"], chapter.id.to_string());
        assert_eq!(ctx.project(project.id).await.word_count, 4);
    }
}
