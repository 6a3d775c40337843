//! Bearer 认证中间件

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::jwt::JwtVerifier;
use crate::domain::project::UserId;
use crate::infrastructure::http::error::ApiError;

/// 已认证的调用方，由中间件写入请求扩展
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

pub async fn require_bearer_auth(
    State(verifier): State<Arc<JwtVerifier>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(extract_bearer_token)
    {
        Some(token) => token,
        None => return ApiError::Unauthorized("missing bearer token".to_string()).into_response(),
    };

    let user_id = match verifier.verify(token) {
        Ok(user_id) => user_id,
        Err(e) => {
            tracing::debug!(error = %e, "Bearer token rejected");
            return ApiError::Unauthorized("invalid bearer token".to_string()).into_response();
        }
    };

    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id });

    next.run(request).await
}

fn extract_bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    Some(token)
}
