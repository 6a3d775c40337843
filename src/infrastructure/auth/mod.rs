//! Authentication - Bearer JWT 校验
//!
//! 令牌由外部身份服务签发，这里只做验证并注入调用方身份

pub mod jwt;
pub mod middleware;

pub use jwt::{AuthError, JwtVerifier};
pub use middleware::{require_bearer_auth, AuthenticatedUser};
