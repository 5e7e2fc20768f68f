// src/middleware/auth.rs

use crate::domain::role_model::RoleName;
use crate::error::AppError;
use crate::repository::user_repository::UserRepository;
use crate::utils::jwt::JwtManager;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// JWT認証ミドルウェアの設定
#[derive(Clone)]
pub struct AuthMiddlewareConfig {
    pub jwt_manager: Arc<JwtManager>,
    pub user_repository: Arc<UserRepository>,
}

/// 認証済みユーザー情報を格納するエクステンション
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
    pub role: RoleName,
}

impl AuthenticatedUser {
    /// 管理者かチェック
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

// ハンドラー引数として直接取り出せるようにする
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

/// JWT認証ミドルウェア
///
/// Bearer トークンを検証し、参照先ユーザーがまだ存在することを確認した上で
/// AuthenticatedUser をリクエストに載せる。
pub async fn jwt_auth_middleware(
    State(config): State<AuthMiddlewareConfig>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    // トークンを抽出
    let token = extract_bearer_token(&headers).ok_or_else(|| {
        warn!(path = %path, "Missing authentication token");
        AppError::Unauthorized("Authentication required".to_string())
    })?;

    // JWTを検証
    let claims = config.jwt_manager.verify_access_token(&token).map_err(|e| {
        warn!(path = %path, error = %e, "Invalid access token");
        AppError::Unauthorized("Invalid or expired token".to_string())
    })?;

    // トークンが指すユーザーがまだ存在するか確認
    let user = config
        .user_repository
        .find_by_id(claims.user_id)
        .await?
        .ok_or_else(|| {
            warn!(user_id = %claims.user_id, path = %path, "Token references a deleted user");
            AppError::Unauthorized("Invalid or expired token".to_string())
        })?;

    let authenticated_user = AuthenticatedUser {
        user_id: user.id,
        username: user.username,
        role: claims.role,
    };

    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}

/// Authorization ヘッダーから Bearer トークンを抽出
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(
            extract_bearer_token(&headers),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn test_extract_bearer_token_missing_or_malformed() {
        let headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert_eq!(extract_bearer_token(&headers), None);
    }
}
