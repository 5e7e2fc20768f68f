// src/service/report_service.rs
use crate::api::dto::report_dto::TaskStatsDto;
use crate::domain::task_status::TaskStatus;
use crate::error::{AppError, AppResult};
use crate::repository::project_repository::ProjectRepository;
use crate::repository::task_repository::TaskRepository;
use std::sync::Arc;
use uuid::Uuid;

/// レポートサービス：タスクコレクションに対する読み取り専用の集計
pub struct ReportService {
    task_repo: Arc<TaskRepository>,
    project_repo: Arc<ProjectRepository>,
}

impl ReportService {
    pub fn new(task_repo: Arc<TaskRepository>, project_repo: Arc<ProjectRepository>) -> Self {
        Self {
            task_repo,
            project_repo,
        }
    }

    /// ステータス別のタスク数を集計（project_id を指定すると絞り込み）
    pub async fn task_stats(&self, project_id: Option<Uuid>) -> AppResult<TaskStatsDto> {
        if let Some(project_id) = project_id {
            self.project_repo
                .find_by_id(project_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Project with id {} not found", project_id))
                })?;
        }

        let total = self.task_repo.count_by_status(None, project_id).await?;
        let completed = self
            .task_repo
            .count_by_status(Some(TaskStatus::Completed), project_id)
            .await?;
        let in_progress = self
            .task_repo
            .count_by_status(Some(TaskStatus::InProgress), project_id)
            .await?;
        let new_tasks = self
            .task_repo
            .count_by_status(Some(TaskStatus::New), project_id)
            .await?;

        Ok(TaskStatsDto {
            total,
            completed,
            in_progress,
            new_tasks,
        })
    }
}
