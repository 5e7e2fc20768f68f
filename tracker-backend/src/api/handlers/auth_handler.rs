// src/api/handlers/auth_handler.rs
use crate::api::dto::auth_dto::{LoginRequest, RegisterRequest, TokenResponse};
use crate::api::AppState;
use crate::domain::user_model::SafeUser;
use crate::error::AppResult;
use axum::{
    extract::{Form, Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Router,
};
use tracing::info;

/// 認証不要のルート（トークン発行と自己登録）
pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/auth/token", post(login_handler))
        .route("/register", post(register_handler))
}

/// OAuth2互換のフォームエンコードでトークンを発行
pub async fn login_handler(
    State(app_state): State<AppState>,
    Form(payload): Form<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = app_state.auth_service.login(payload).await?;
    Ok(Json(token))
}

/// 自己登録：ロールは常に executor に強制される
pub async fn register_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    info!(username = %payload.username, "Registering new user");

    let user: SafeUser = app_state
        .user_service
        .register_user(
            payload.username,
            payload.full_name,
            payload.email,
            payload.password,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}
