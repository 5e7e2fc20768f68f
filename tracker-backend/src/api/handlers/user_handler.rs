// src/api/handlers/user_handler.rs
use crate::api::dto::user_dto::{CreateUserDto, UpdateUserDto};
use crate::api::handlers::UuidPath;
use crate::api::AppState;
use crate::domain::role_model::RoleName;
use crate::domain::user_model::SafeUser;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::middleware::authorization::{require_admin_or_self, require_role};
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use tracing::info;

pub fn user_router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user_handler))
        .route("/users", get(list_users_handler))
        .route("/users/{id}", get(get_user_handler))
        .route("/users/{id}", put(update_user_handler))
        .route("/users/{id}", delete(delete_user_handler))
}

/// ユーザー作成（管理者のみ）
pub async fn create_user_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateUserDto>,
) -> AppResult<impl IntoResponse> {
    require_role(&user, &[RoleName::Admin])?;

    info!(
        admin_id = %user.user_id,
        username = %payload.username,
        "Creating user"
    );

    let created = app_state.user_service.create_user(payload).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// ユーザー一覧（管理者のみ）
pub async fn list_users_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<Vec<SafeUser>>> {
    require_role(&user, &[RoleName::Admin])?;

    let users = app_state.user_service.list_users().await?;
    Ok(Json(users))
}

/// ユーザー取得（本人または管理者）
pub async fn get_user_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<Json<SafeUser>> {
    require_admin_or_self(&user, id)?;

    let target = app_state.user_service.get_user(id).await?;
    Ok(Json(target))
}

/// ユーザー更新（本人または管理者、ロール変更は管理者のみ）
pub async fn update_user_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
    Json(payload): Json<UpdateUserDto>,
) -> AppResult<Json<SafeUser>> {
    require_admin_or_self(&user, id)?;

    if payload.role.is_some() && !user.is_admin() {
        return Err(AppError::Forbidden(
            "Only administrators can change roles".to_string(),
        ));
    }

    let updated = app_state.user_service.update_user(id, payload).await?;
    Ok(Json(updated))
}

/// ユーザー削除（管理者のみ）
pub async fn delete_user_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<StatusCode> {
    require_role(&user, &[RoleName::Admin])?;

    app_state.user_service.delete_user(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
