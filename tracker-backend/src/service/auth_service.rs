// src/service/auth_service.rs
use crate::api::dto::auth_dto::{LoginRequest, TokenResponse};
use crate::domain::role_model::RoleName;
use crate::error::{AppError, AppResult};
use crate::repository::role_repository::RoleRepository;
use crate::repository::user_repository::UserRepository;
use crate::utils::jwt::JwtManager;
use crate::utils::password::PasswordManager;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// 認証サービス
pub struct AuthService {
    user_repo: Arc<UserRepository>,
    role_repo: Arc<RoleRepository>,
    password_manager: Arc<PasswordManager>,
    jwt_manager: Arc<JwtManager>,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<UserRepository>,
        role_repo: Arc<RoleRepository>,
        password_manager: Arc<PasswordManager>,
        jwt_manager: Arc<JwtManager>,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            password_manager,
            jwt_manager,
        }
    }

    /// ユーザー名とパスワードを検証してアクセストークンを発行
    pub async fn login(&self, login_data: LoginRequest) -> AppResult<TokenResponse> {
        login_data.validate()?;

        // ユーザー検索
        let user = self
            .user_repo
            .find_by_username(&login_data.username)
            .await?
            .ok_or_else(|| {
                warn!(
                    username = %login_data.username,
                    "Login attempt with unknown username"
                );
                AppError::Unauthorized("Invalid credentials".to_string())
            })?;

        // パスワード検証
        let is_valid = self
            .password_manager
            .verify_password(&login_data.password, &user.password_hash)
            .map_err(|e| {
                warn!(user_id = %user.id, error = %e, "Password verification failed");
                AppError::InternalServerError("Authentication failed".to_string())
            })?;

        if !is_valid {
            warn!(
                user_id = %user.id,
                username = %user.username,
                "Login attempt with incorrect password"
            );
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        // ロールを解決してトークンに埋め込む
        let role = self
            .role_repo
            .find_by_id(user.role_id)
            .await?
            .and_then(|r| RoleName::from_str(&r.name))
            .ok_or_else(|| {
                AppError::InternalServerError("User references an unknown role".to_string())
            })?;

        let access_token = self
            .jwt_manager
            .generate_access_token(user.id, &user.username, role)
            .map_err(|e| {
                warn!(user_id = %user.id, error = %e, "Failed to issue access token");
                AppError::InternalServerError("Failed to issue access token".to_string())
            })?;

        info!(user_id = %user.id, username = %user.username, "User signed in successfully");

        Ok(TokenResponse::bearer(access_token))
    }
}
