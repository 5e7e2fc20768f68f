// src/api/dto/auth_dto.rs
use crate::utils::validation::validate_username;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// ログインリクエスト（OAuth2互換のフォームエンコード）
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

/// 発行されたアクセストークン
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// 自己登録リクエスト（ロールは常に executor に強制される）
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, max = 100, message = "Username must be 3 to 100 characters"),
        custom(function = "validate_username")
    )]
    pub username: String,

    pub full_name: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    #[validate(length(min = 6, max = 128, message = "Password must be 6 to 128 characters"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_bearer() {
        let token = TokenResponse::bearer("abc".to_string());
        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.access_token, "abc");
    }

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            username: "alice_01".to_string(),
            full_name: None,
            email: Some("alice@example.com".to_string()),
            password: "secret123".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_username = RegisterRequest {
            username: "bad name!".to_string(),
            full_name: None,
            email: None,
            password: "secret123".to_string(),
        };
        assert!(bad_username.validate().is_err());

        let short_password = RegisterRequest {
            username: "alice".to_string(),
            full_name: None,
            email: None,
            password: "abc".to_string(),
        };
        assert!(short_password.validate().is_err());
    }
}
