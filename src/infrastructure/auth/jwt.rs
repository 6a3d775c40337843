//! JWT 校验
//!
//! 只负责验证由外部身份服务签发的 HS256 访问令牌，不签发令牌

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::project::UserId;

/// 密钥最小长度（按字符计）
pub const MIN_SECRET_LEN: usize = 32;

/// 认证错误
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("jwt secret must be at least 32 characters long")]
    SecretTooShort,

    #[error("invalid access token: {0}")]
    InvalidToken(String),

    #[error("access token subject '{0}' is not a UUID")]
    InvalidSubject(String),
}

/// exp 由 Validation 校验，这里只需要 sub
#[derive(Debug, Deserialize)]
struct AccessTokenClaims {
    sub: String,
}

/// 访问令牌校验器
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Result<Self, AuthError> {
        if secret.chars().count() < MIN_SECRET_LEN {
            return Err(AuthError::SecretTooShort);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// 校验令牌并返回其 subject 对应的用户
    pub fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        let claims = decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?
            .claims;

        let user_id =
            Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidSubject(claims.sub))?;

        Ok(UserId::from_uuid(user_id))
    }
}

#[cfg(test)]
pub(crate) mod test_tokens {
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde::Serialize;

    pub const TEST_SECRET: &str = "ainovel_test_secret_that_is_definitely_long_enough";

    #[derive(Serialize)]
    struct Claims<'a> {
        sub: &'a str,
        exp: i64,
    }

    pub fn token_for(sub: &str, exp: i64) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &Claims { sub, exp },
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap()
    }

    pub fn valid_token(sub: &str) -> String {
        token_for(sub, chrono::Utc::now().timestamp() + 3600)
    }
}
