// src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DbErr(#[from] DbErr),

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Validation failed")]
    ValidationFailure(#[from] ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

// axum でエラーをHTTPレスポンスに変換するための実装
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::DbErr(db_err) => {
                tracing::error!(error = ?db_err, "Database error"); // サーバーログには詳細を出す

                let status = match db_err {
                    DbErr::RecordNotFound(_) => StatusCode::NOT_FOUND,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };

                let message = match &db_err {
                    DbErr::RecordNotFound(_) => "The requested resource was not found".to_string(),
                    _ => "A database error occurred".to_string(),
                };

                (
                    status,
                    ErrorResponse {
                        error: message.clone(),
                        message,
                        error_type: "database_error".to_string(),
                    },
                )
            }
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: message.clone(),
                    message,
                    error_type: "not_found".to_string(),
                },
            ),
            AppError::ValidationError(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message.clone(),
                    message,
                    error_type: "validation_error".to_string(),
                },
            ),
            AppError::ValidationFailure(errors) => {
                let messages: Vec<String> = errors
                    .field_errors()
                    .into_iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            let detail = e
                                .message
                                .as_ref()
                                .map_or_else(|| "Invalid value".to_string(), |m| m.to_string());
                            format!("{}: {}", field, detail)
                        })
                    })
                    .collect();
                let message = messages.join("; ");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: message.clone(),
                        message,
                        error_type: "validation_error".to_string(),
                    },
                )
            }
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message.clone(),
                    message,
                    error_type: "bad_request".to_string(),
                },
            ),
            AppError::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse {
                    error: message.clone(),
                    message,
                    error_type: "unauthorized".to_string(),
                },
            ),
            AppError::Forbidden(message) => (
                StatusCode::FORBIDDEN,
                ErrorResponse {
                    error: message.clone(),
                    message,
                    error_type: "forbidden".to_string(),
                },
            ),
            // 一意制約違反はクライアント契約上 400 で返す
            AppError::Conflict(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message.clone(),
                    message,
                    error_type: "conflict".to_string(),
                },
            ),
            AppError::InternalServerError(message) => {
                tracing::error!(error = %message, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "An internal server error occurred".to_string(),
                        message: "An internal server error occurred".to_string(),
                        error_type: "internal_server_error".to_string(),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

// Result 型のエイリアス
pub type AppResult<T> = Result<T, AppError>;

/// 統一的なエラーレスポンス構造
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub error_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::NotFound("Task not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unauthorized_maps_to_401() {
        let response = AppError::Unauthorized("Invalid credentials".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_forbidden_maps_to_403() {
        let response = AppError::Forbidden("Insufficient role".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_conflict_maps_to_400() {
        // 重複ユーザー名などの衝突はクライアント契約上 400
        let response = AppError::Conflict("Username already registered".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validation_error_maps_to_400() {
        let response = AppError::ValidationError("bad input".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
