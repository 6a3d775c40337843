//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                     GET   健康检查（无需认证）
//! - /api/project/create           POST  创建项目
//! - /api/project/get              POST  获取项目详情
//! - /api/project/list             GET   列出当前用户的项目
//! - /api/project/update           POST  更新项目
//! - /api/project/delete           POST  删除项目
//! - /api/chapter/create           POST  创建章节
//! - /api/chapter/list             POST  列出项目章节
//! - /api/chapter/get              POST  获取章节详情
//! - /api/chapter/update           POST  更新章节
//! - /api/chapter/delete           POST  删除章节
//! - /api/chapter/unpublished      POST  列出未发布章节
//! - /api/chapter/batch_status     POST  级联更新状态
//! - /api/chapter/batch_publish    POST  批量发布

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;
use crate::infrastructure::auth::{require_bearer_auth, JwtVerifier};

/// 创建所有路由
pub fn create_routes(jwt_verifier: Arc<JwtVerifier>) -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes(jwt_verifier))
}

/// API 路由
fn api_routes(jwt_verifier: Arc<JwtVerifier>) -> Router<Arc<AppState>> {
    let protected = Router::new()
        .nest("/project", project_routes())
        .nest("/chapter", chapter_routes())
        .route_layer(middleware::from_fn_with_state(
            jwt_verifier,
            require_bearer_auth,
        ));

    Router::new()
        .route("/ping", get(handlers::ping))
        .merge(protected)
}

/// Project 路由
fn project_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(handlers::create_project))
        .route("/get", post(handlers::get_project))
        .route("/list", get(handlers::list_projects))
        .route("/update", post(handlers::update_project))
        .route("/delete", post(handlers::delete_project))
}

/// Chapter 路由
fn chapter_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(handlers::create_chapter))
        .route("/list", post(handlers::list_chapters))
        .route("/get", post(handlers::get_chapter))
        .route("/update", post(handlers::update_chapter))
        .route("/delete", post(handlers::delete_chapter))
        .route("/unpublished", post(handlers::list_unpublished_chapters))
        .route("/batch_status", post(handlers::batch_update_status))
        .route("/batch_publish", post(handlers::batch_publish_chapters))
}
