// src/api/handlers/task_handler.rs
use crate::api::dto::attachment_dto::AttachmentDto;
use crate::api::dto::comment_dto::{CommentDto, CreateCommentDto};
use crate::api::dto::common::{PaginationQuery, SearchQuery};
use crate::api::dto::task_dto::{CreateTaskDto, TaskDetailDto, TaskDto, UpdateTaskDto};
use crate::api::handlers::UuidPath;
use crate::api::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::middleware::authorization::require_manage;
use axum::{
    extract::{Json, Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use tracing::info;
use uuid::Uuid;

pub fn task_router() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks_handler))
        .route("/tasks", post(create_task_handler))
        .route("/tasks/search", get(search_tasks_handler))
        .route("/tasks/{id}", get(get_task_handler))
        .route("/tasks/{id}", put(update_task_handler))
        .route("/tasks/{id}", delete(delete_task_handler))
        .route("/tasks/{id}/comments", post(create_comment_handler))
        .route("/tasks/{id}/comments", get(list_comments_handler))
        .route("/tasks/{id}/attachments", post(upload_attachment_handler))
        .route("/tasks/{id}/attachments", get(list_attachments_handler))
        .route(
            "/tasks/{id}/attachments/{attachment_id}",
            delete(delete_attachment_handler),
        )
        .route("/tasks/{id}/subtasks", post(create_subtask_handler))
}

/// タスク一覧：executor は自分のタスクのみ、admin/manager は全件
pub async fn list_tasks_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(pagination): Query<PaginationQuery>,
) -> AppResult<Json<Vec<TaskDto>>> {
    let tasks = app_state
        .task_service
        .list_tasks(&user, pagination.skip, pagination.limit())
        .await?;

    Ok(Json(tasks))
}

/// タスク作成（admin/manager）
pub async fn create_task_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateTaskDto>,
) -> AppResult<impl IntoResponse> {
    require_manage(&user)?;

    info!(
        user_id = %user.user_id,
        project_id = %payload.project_id,
        "Creating task"
    );

    let task = app_state
        .task_service
        .create_task(user.user_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// タスク説明文の部分一致検索
pub async fn search_tasks_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<TaskDto>>> {
    let tasks = app_state.task_service.search_tasks(&query.query).await?;
    Ok(Json(tasks))
}

pub async fn get_task_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<Json<TaskDetailDto>> {
    let task = app_state.task_service.get_task(id).await?;
    Ok(Json(task))
}

/// タスク更新：admin/manager または担当 executor のみ
pub async fn update_task_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
    Json(payload): Json<UpdateTaskDto>,
) -> AppResult<Json<TaskDto>> {
    let task = app_state.task_service.update_task(&user, id, payload).await?;
    Ok(Json(task))
}

/// タスク削除（admin/manager）
pub async fn delete_task_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<StatusCode> {
    require_manage(&user)?;

    app_state.task_service.delete_task(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// コメント投稿（認証済みなら誰でも）
pub async fn create_comment_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
    Json(payload): Json<CreateCommentDto>,
) -> AppResult<impl IntoResponse> {
    let comment = app_state
        .comment_service
        .create_comment(user.user_id, id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// コメント一覧（作成日時の昇順）
pub async fn list_comments_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<Json<Vec<CommentDto>>> {
    let comments = app_state.comment_service.list_comments(id).await?;
    Ok(Json(comments))
}

/// ファイルアップロード（multipart）
pub async fn upload_attachment_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    info!(user_id = %user.user_id, task_id = %id, "Starting file upload");

    // multipartデータを処理
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart data: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            // ファイル名を取得
            let file_name = field
                .file_name()
                .ok_or_else(|| AppError::BadRequest("File name is required".to_string()))?
                .to_string();

            // ファイルデータを読み込む
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read file data: {}", e)))?;

            let attachment = app_state
                .attachment_service
                .upload_file(id, file_name, data.to_vec())
                .await?;

            return Ok((StatusCode::CREATED, Json(attachment)));
        }
    }

    Err(AppError::BadRequest(
        "Multipart field 'file' is required".to_string(),
    ))
}

/// 添付ファイル一覧
pub async fn list_attachments_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<Json<Vec<AttachmentDto>>> {
    let attachments = app_state.attachment_service.list_attachments(id).await?;
    Ok(Json(attachments))
}

/// 添付ファイル削除：指定タスクに属していなければ NotFound
pub async fn delete_attachment_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path((id, attachment_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    app_state
        .attachment_service
        .delete_attachment(id, attachment_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// サブタスク作成：親タスクはパスで指定（admin/manager）
pub async fn create_subtask_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
    Json(payload): Json<CreateTaskDto>,
) -> AppResult<impl IntoResponse> {
    require_manage(&user)?;

    let task = app_state
        .task_service
        .create_subtask(user.user_id, id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}
