// src/api/dto/user_dto.rs
use crate::domain::role_model::RoleName;
use crate::utils::validation::validate_username;
use serde::Deserialize;
use validator::Validate;

/// 管理者によるユーザー作成リクエスト
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserDto {
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

    pub role: RoleName,
}

/// 部分更新リクエスト：指定されたフィールドのみ変更する
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserDto {
    pub full_name: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    #[validate(length(min = 6, max = 128, message = "Password must be 6 to 128 characters"))]
    pub password: Option<String>,

    /// ロール変更は管理者のみ許可される
    pub role: Option<RoleName>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_dto_deserializes_role() {
        let dto: CreateUserDto = serde_json::from_str(
            r#"{"username": "bob", "password": "secret123", "role": "manager"}"#,
        )
        .unwrap();
        assert_eq!(dto.role, RoleName::Manager);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_unknown_role_rejected_at_parse() {
        let result: Result<CreateUserDto, _> = serde_json::from_str(
            r#"{"username": "bob", "password": "secret123", "role": "superuser"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_update_user_dto_partial() {
        let dto: UpdateUserDto = serde_json::from_str(r#"{"full_name": "Bob B."}"#).unwrap();
        assert_eq!(dto.full_name.as_deref(), Some("Bob B."));
        assert!(dto.email.is_none());
        assert!(dto.password.is_none());
        assert!(dto.role.is_none());
    }
}
