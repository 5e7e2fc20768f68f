// src/service/user_service.rs
use crate::api::dto::user_dto::{CreateUserDto, UpdateUserDto};
use crate::domain::role_model::RoleName;
use crate::domain::user_model::{ActiveModel as UserActiveModel, SafeUser};
use crate::error::{AppError, AppResult};
use crate::repository::role_repository::RoleRepository;
use crate::repository::user_repository::UserRepository;
use crate::utils::password::PasswordManager;
use sea_orm::Set;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// ユーザー管理サービス
pub struct UserService {
    user_repo: Arc<UserRepository>,
    role_repo: Arc<RoleRepository>,
    password_manager: Arc<PasswordManager>,
}

impl UserService {
    pub fn new(
        user_repo: Arc<UserRepository>,
        role_repo: Arc<RoleRepository>,
        password_manager: Arc<PasswordManager>,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            password_manager,
        }
    }

    /// ユーザー作成
    ///
    /// ユーザー名の重複は Conflict、未知のロールはバリデーションエラー。
    pub async fn create_user(&self, payload: CreateUserDto) -> AppResult<SafeUser> {
        payload.validate()?;

        if self.user_repo.is_username_taken(&payload.username).await? {
            return Err(AppError::Conflict(
                "Username is already registered".to_string(),
            ));
        }

        if let Some(email) = &payload.email {
            if self.user_repo.is_email_taken(email).await? {
                return Err(AppError::Conflict(
                    "Email address is already registered".to_string(),
                ));
            }
        }

        // ロール名からロールレコードを解決
        let role = self
            .role_repo
            .find_by_name(payload.role)
            .await?
            .ok_or_else(|| {
                AppError::ValidationError(format!("Unknown role: {}", payload.role))
            })?;

        let password_hash = self
            .password_manager
            .hash_password(&payload.password)
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let user = self
            .user_repo
            .create(
                payload.username,
                payload.full_name,
                payload.email,
                password_hash,
                role.id,
            )
            .await?;

        info!(user_id = %user.id, username = %user.username, role = %payload.role, "User created");

        Ok(user.to_safe_user(payload.role))
    }

    /// 自己登録：ロールは常に executor に強制される
    pub async fn register_user(
        &self,
        username: String,
        full_name: Option<String>,
        email: Option<String>,
        password: String,
    ) -> AppResult<SafeUser> {
        self.create_user(CreateUserDto {
            username,
            full_name,
            email,
            password,
            role: RoleName::Executor,
        })
        .await
    }

    pub async fn get_user(&self, user_id: Uuid) -> AppResult<SafeUser> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let role = self.resolve_role(user.role_id).await?;
        Ok(user.to_safe_user(role))
    }

    pub async fn get_user_by_username(&self, username: &str) -> AppResult<SafeUser> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let role = self.resolve_role(user.role_id).await?;
        Ok(user.to_safe_user(role))
    }

    pub async fn list_users(&self) -> AppResult<Vec<SafeUser>> {
        let users = self.user_repo.find_all().await?;
        let roles = self.role_map().await?;

        Ok(users
            .into_iter()
            .filter_map(|user| {
                let role = roles.get(&user.role_id).copied()?;
                Some(user.to_safe_user(role))
            })
            .collect())
    }

    /// 部分更新：指定されたフィールドのみ変更する
    ///
    /// ロール変更の権限チェックはハンドラー側で済んでいる前提。
    pub async fn update_user(&self, user_id: Uuid, payload: UpdateUserDto) -> AppResult<SafeUser> {
        payload.validate()?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if let Some(email) = &payload.email {
            if user.email.as_deref() != Some(email.as_str())
                && self.user_repo.is_email_taken(email).await?
            {
                return Err(AppError::Conflict(
                    "Email address is already registered".to_string(),
                ));
            }
        }

        let mut active: UserActiveModel = user.into();

        if let Some(full_name) = payload.full_name {
            active.full_name = Set(Some(full_name));
        }

        if let Some(email) = payload.email {
            active.email = Set(Some(email));
        }

        if let Some(password) = payload.password {
            let password_hash = self
                .password_manager
                .hash_password(&password)
                .map_err(|e| AppError::ValidationError(e.to_string()))?;
            active.password_hash = Set(password_hash);
        }

        if let Some(role_name) = payload.role {
            let role = self
                .role_repo
                .find_by_name(role_name)
                .await?
                .ok_or_else(|| {
                    AppError::ValidationError(format!("Unknown role: {}", role_name))
                })?;
            active.role_id = Set(role.id);
        }

        let updated = self.user_repo.update(active).await?;
        let role = self.resolve_role(updated.role_id).await?;

        info!(user_id = %user_id, "User updated");

        Ok(updated.to_safe_user(role))
    }

    /// ユーザー削除
    ///
    /// コメントはFKカスケードで消え、タスクの担当者・作成者参照はNULLになる。
    pub async fn delete_user(&self, user_id: Uuid) -> AppResult<()> {
        let result = self.user_repo.delete(user_id).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        info!(user_id = %user_id, "User deleted");

        Ok(())
    }

    async fn resolve_role(&self, role_id: Uuid) -> AppResult<RoleName> {
        self.role_repo
            .find_by_id(role_id)
            .await?
            .and_then(|r| RoleName::from_str(&r.name))
            .ok_or_else(|| {
                AppError::InternalServerError("User references an unknown role".to_string())
            })
    }

    /// ロールIDからロール名への対応表
    async fn role_map(&self) -> AppResult<HashMap<Uuid, RoleName>> {
        let roles = self.role_repo.find_all().await?;
        Ok(roles
            .into_iter()
            .filter_map(|r| Some((r.id, RoleName::from_str(&r.name)?)))
            .collect())
    }
}
