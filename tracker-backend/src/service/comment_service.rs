// src/service/comment_service.rs
use crate::api::dto::comment_dto::{CommentDto, CreateCommentDto};
use crate::error::{AppError, AppResult};
use crate::repository::comment_repository::CommentRepository;
use crate::repository::task_repository::TaskRepository;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// コメントサービス
pub struct CommentService {
    repo: Arc<CommentRepository>,
    task_repo: Arc<TaskRepository>,
}

impl CommentService {
    pub fn new(repo: Arc<CommentRepository>, task_repo: Arc<TaskRepository>) -> Self {
        Self { repo, task_repo }
    }

    /// コメント作成：操作者と対象タスクに紐付ける
    pub async fn create_comment(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        payload: CreateCommentDto,
    ) -> AppResult<CommentDto> {
        payload.validate()?;

        self.task_repo
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Task with id {} not found", task_id)))?;

        let comment = self.repo.create(payload.content, user_id, task_id).await?;

        info!(comment_id = %comment.id, task_id = %task_id, user_id = %user_id, "Comment created");

        Ok(comment.into())
    }

    /// タスクのコメント一覧（作成日時の昇順）
    pub async fn list_comments(&self, task_id: Uuid) -> AppResult<Vec<CommentDto>> {
        self.task_repo
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Task with id {} not found", task_id)))?;

        let comments = self.repo.find_by_task(task_id).await?;
        Ok(comments.into_iter().map(Into::into).collect())
    }
}
