// src/utils/jwt.rs

use crate::domain::role_model::RoleName;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use uuid::Uuid;

/// JWT関連のエラー
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Failed to encode JWT: {0}")]
    EncodingError(jsonwebtoken::errors::Error),

    #[error("JWT token has expired")]
    TokenExpired,

    #[error("Invalid JWT token")]
    InvalidToken,

    #[error("Missing JWT secret key")]
    MissingSecretKey,

    #[error("Invalid JWT configuration: {0}")]
    ConfigurationError(String),
}

/// アクセストークンのClaims
///
/// 認証済みのユーザー名・ユーザーID・ロールを埋め込む。
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessTokenClaims {
    /// Subject (username)
    pub sub: String,
    /// User ID
    pub user_id: Uuid,
    /// Role
    pub role: RoleName,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

/// JWT設定
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// JWT秘密鍵
    pub secret_key: String,
    /// アクセストークンの有効期限（分）
    pub access_token_expiry_minutes: i64,
}

impl JwtConfig {
    /// 環境変数から設定を読み込み
    pub fn from_env() -> Result<Self, JwtError> {
        let secret_key = env::var("JWT_SECRET_KEY").map_err(|_| JwtError::MissingSecretKey)?;

        let access_token_expiry_minutes = env::var("JWT_ACCESS_TOKEN_EXPIRY_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| JwtError::ConfigurationError("Invalid access token expiry".to_string()))?;

        let config = Self {
            secret_key,
            access_token_expiry_minutes,
        };
        config.validate()?;

        Ok(config)
    }

    /// 設定の検証
    pub fn validate(&self) -> Result<(), JwtError> {
        if self.secret_key.len() < 32 {
            return Err(JwtError::ConfigurationError(
                "JWT secret key must be at least 32 characters".to_string(),
            ));
        }

        if self.access_token_expiry_minutes <= 0 {
            return Err(JwtError::ConfigurationError(
                "Access token expiry must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// JWTの発行と検証を担うマネージャー
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(config: JwtConfig) -> Result<Self, JwtError> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
        })
    }

    pub fn from_env() -> Result<Self, JwtError> {
        Self::new(JwtConfig::from_env()?)
    }

    /// アクセストークンを生成
    pub fn generate_access_token(
        &self,
        user_id: Uuid,
        username: &str,
        role: RoleName,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiry = now + Duration::minutes(self.config.access_token_expiry_minutes);

        let claims = AccessTokenClaims {
            sub: username.to_string(),
            user_id,
            role,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(JwtError::EncodingError)
    }

    /// アクセストークンを検証してClaimsを取得
    pub fn verify_access_token(&self, token: &str) -> Result<AccessTokenClaims, JwtError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::InvalidToken,
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_manager(expiry_minutes: i64) -> JwtManager {
        JwtManager::new(JwtConfig {
            secret_key: "test-secret-key-that-is-long-enough!".to_string(),
            access_token_expiry_minutes: expiry_minutes,
        })
        .unwrap()
    }

    #[test]
    fn test_token_roundtrip() {
        let manager = test_manager(30);
        let user_id = Uuid::new_v4();

        let token = manager
            .generate_access_token(user_id, "alice", RoleName::Executor)
            .unwrap();
        let claims = manager.verify_access_token(&token).unwrap();

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.role, RoleName::Executor);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_invalid_token_rejected() {
        let manager = test_manager(30);

        let result = manager.verify_access_token("not-a-jwt");
        assert!(matches!(result, Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let manager = test_manager(30);
        let other = JwtManager::new(JwtConfig {
            secret_key: "another-secret-key-that-is-long-enough".to_string(),
            access_token_expiry_minutes: 30,
        })
        .unwrap();

        let token = other
            .generate_access_token(Uuid::new_v4(), "mallory", RoleName::Admin)
            .unwrap();
        assert!(matches!(
            manager.verify_access_token(&token),
            Err(JwtError::InvalidToken)
        ));
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = JwtManager::new(JwtConfig {
            secret_key: "too-short".to_string(),
            access_token_expiry_minutes: 30,
        });
        assert!(matches!(result, Err(JwtError::ConfigurationError(_))));
    }
}
