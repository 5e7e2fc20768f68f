// src/service/task_service.rs

use crate::api::dto::task_dto::{CreateTaskDto, TaskDetailDto, TaskDto, UpdateTaskDto};
use crate::domain::role_model::RoleName;
use crate::domain::task_model::ActiveModel as TaskActiveModel;
use crate::domain::task_status::TaskStatus;
use crate::domain::user_model::SafeUser;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::middleware::authorization::require_task_update;
use crate::repository::attachment_repository::AttachmentRepository;
use crate::repository::comment_repository::CommentRepository;
use crate::repository::project_repository::ProjectRepository;
use crate::repository::role_repository::RoleRepository;
use crate::repository::task_repository::TaskRepository;
use crate::repository::user_repository::UserRepository;
use chrono::Utc;
use sea_orm::{ActiveModelBehavior, Set};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// タスク管理サービス
pub struct TaskService {
    repo: Arc<TaskRepository>,
    project_repo: Arc<ProjectRepository>,
    user_repo: Arc<UserRepository>,
    role_repo: Arc<RoleRepository>,
    comment_repo: Arc<CommentRepository>,
    attachment_repo: Arc<AttachmentRepository>,
}

impl TaskService {
    pub fn new(
        repo: Arc<TaskRepository>,
        project_repo: Arc<ProjectRepository>,
        user_repo: Arc<UserRepository>,
        role_repo: Arc<RoleRepository>,
        comment_repo: Arc<CommentRepository>,
        attachment_repo: Arc<AttachmentRepository>,
    ) -> Self {
        Self {
            repo,
            project_repo,
            user_repo,
            role_repo,
            comment_repo,
            attachment_repo,
        }
    }

    /// タスク作成
    ///
    /// 担当者が指定された場合は assignment_date に現在時刻を設定する。
    pub async fn create_task(
        &self,
        creator_id: Uuid,
        payload: CreateTaskDto,
    ) -> AppResult<TaskDto> {
        payload.validate()?;

        // 参照先の存在チェック
        self.project_repo
            .find_by_id(payload.project_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Project with id {} not found", payload.project_id))
            })?;

        if let Some(assignee_id) = payload.assigned_user_id {
            self.user_repo
                .find_by_id(assignee_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("User with id {} not found", assignee_id))
                })?;
        }

        if let Some(parent_task_id) = payload.parent_task_id {
            self.repo.find_by_id(parent_task_id).await?.ok_or_else(|| {
                AppError::NotFound(format!("Task with id {} not found", parent_task_id))
            })?;
        }

        let assignment_date = payload.assigned_user_id.map(|_| Utc::now());

        let task = TaskActiveModel {
            description: Set(payload.description),
            details: Set(payload.details),
            status: Set(TaskStatus::default().to_string()),
            priority: Set(payload.priority.to_string()),
            due_date: Set(payload.due_date),
            estimated_time: Set(payload.estimated_time),
            time_spent: Set(0.0),
            project_id: Set(payload.project_id),
            assigned_user_id: Set(payload.assigned_user_id),
            creator_id: Set(Some(creator_id)),
            parent_task_id: Set(payload.parent_task_id),
            assignment_date: Set(assignment_date),
            ..TaskActiveModel::new()
        };

        let created = self.repo.create(task).await?;

        info!(
            task_id = %created.id,
            project_id = %created.project_id,
            creator_id = %creator_id,
            "Task created"
        );

        Ok(created.into())
    }

    /// サブタスク作成：parent_task_id はパスで指定された親に強制する
    pub async fn create_subtask(
        &self,
        creator_id: Uuid,
        parent_task_id: Uuid,
        mut payload: CreateTaskDto,
    ) -> AppResult<TaskDto> {
        // 親の存在チェックは create_task 側で行われる
        payload.parent_task_id = Some(parent_task_id);
        self.create_task(creator_id, payload).await
    }

    /// 単一タスクの詳細ビューを取得
    pub async fn get_task(&self, id: Uuid) -> AppResult<TaskDetailDto> {
        let task = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Task with id {} not found", id)))?;

        let assigned_user = match task.assigned_user_id {
            Some(user_id) => self.safe_user(user_id).await?,
            None => None,
        };

        let creator = match task.creator_id {
            Some(user_id) => self.safe_user(user_id).await?,
            None => None,
        };

        let comments = self.comment_repo.find_by_task(id).await?;
        let attachments = self.attachment_repo.find_by_task(id).await?;
        let subtasks = self.repo.find_subtasks(id).await?;

        Ok(TaskDetailDto {
            task: task.into(),
            assigned_user,
            creator,
            comments: comments.into_iter().map(Into::into).collect(),
            attachments: attachments.into_iter().map(Into::into).collect(),
            subtasks: subtasks.into_iter().map(Into::into).collect(),
        })
    }

    /// タスク一覧
    ///
    /// executor は自分に割り当てられたタスクのみ、admin/manager は全件。
    pub async fn list_tasks(
        &self,
        user: &AuthenticatedUser,
        skip: u64,
        limit: u64,
    ) -> AppResult<Vec<TaskDto>> {
        let tasks = if user.role == RoleName::Executor {
            self.repo
                .find_for_assignee_paginated(user.user_id, skip, limit)
                .await?
        } else {
            self.repo.find_all_paginated(skip, limit).await?
        };

        Ok(tasks.into_iter().map(Into::into).collect())
    }

    /// 部分更新：ステータス・説明・詳細・見積時間・実績時間のみ
    ///
    /// executor は自分に割り当てられたタスクしか更新できない。
    pub async fn update_task(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        payload: UpdateTaskDto,
    ) -> AppResult<TaskDto> {
        payload.validate()?;

        let task = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Task with id {} not found", id)))?;

        require_task_update(user, &task)?;

        let mut active: TaskActiveModel = task.into();

        if let Some(status) = payload.status {
            active.status = Set(status.to_string());
        }

        if let Some(description) = payload.description {
            active.description = Set(description);
        }

        if let Some(details) = payload.details {
            active.details = Set(Some(details));
        }

        if let Some(estimated_time) = payload.estimated_time {
            active.estimated_time = Set(estimated_time);
        }

        if let Some(time_spent) = payload.time_spent {
            active.time_spent = Set(time_spent);
        }

        let updated = self.repo.update(active).await?;

        info!(task_id = %id, user_id = %user.user_id, "Task updated");

        Ok(updated.into())
    }

    /// タスク削除（サブタスク・コメント・添付はFKカスケードで削除される）
    pub async fn delete_task(&self, id: Uuid) -> AppResult<()> {
        let result = self.repo.delete(id).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Task with id {} not found", id)));
        }

        info!(task_id = %id, "Task deleted");

        Ok(())
    }

    /// タスク説明文の部分一致検索（大文字小文字を区別しない）
    pub async fn search_tasks(&self, query: &str) -> AppResult<Vec<TaskDto>> {
        let tasks = self.repo.search_by_description(query).await?;
        Ok(tasks.into_iter().map(Into::into).collect())
    }

    async fn safe_user(&self, user_id: Uuid) -> AppResult<Option<SafeUser>> {
        let Some(user) = self.user_repo.find_by_id(user_id).await? else {
            return Ok(None);
        };

        let role = self
            .role_repo
            .find_by_id(user.role_id)
            .await?
            .and_then(|r| RoleName::from_str(&r.name));

        Ok(role.map(|role| user.to_safe_user(role)))
    }
}
