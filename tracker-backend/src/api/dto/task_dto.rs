// src/api/dto/task_dto.rs
use crate::api::dto::attachment_dto::AttachmentDto;
use crate::api::dto::comment_dto::CommentDto;
use crate::domain::task_model;
use crate::domain::task_priority::TaskPriority;
use crate::domain::task_status::TaskStatus;
use crate::domain::user_model::SafeUser;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTaskDto {
    #[validate(length(min = 1, max = 1000, message = "Description must be 1 to 1000 characters"))]
    pub description: String,

    pub details: Option<String>,

    pub due_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub priority: TaskPriority,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "Estimated time must not be negative"))]
    pub estimated_time: f64,

    pub project_id: Uuid,

    pub assigned_user_id: Option<Uuid>,

    pub parent_task_id: Option<Uuid>,
}

/// 部分更新リクエスト
///
/// このパスで変更できるのはステータス・説明・詳細・見積時間・実績時間のみ。
/// プロジェクト・担当者・親タスクなどは作成後に変更できない。
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTaskDto {
    pub status: Option<TaskStatus>,

    #[validate(length(min = 1, max = 1000, message = "Description must be 1 to 1000 characters"))]
    pub description: Option<String>,

    pub details: Option<String>,

    #[validate(range(min = 0.0, message = "Estimated time must not be negative"))]
    pub estimated_time: Option<f64>,

    #[validate(range(min = 0.0, message = "Time spent must not be negative"))]
    pub time_spent: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDto {
    pub id: Uuid,
    pub description: String,
    pub details: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub estimated_time: f64,
    pub time_spent: f64,
    pub project_id: Uuid,
    pub assigned_user_id: Option<Uuid>,
    pub creator_id: Option<Uuid>,
    pub parent_task_id: Option<Uuid>,
    pub assignment_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<task_model::Model> for TaskDto {
    fn from(model: task_model::Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
            details: model.details,
            status: TaskStatus::from_str(&model.status).unwrap_or_default(),
            priority: TaskPriority::from_str(&model.priority).unwrap_or_default(),
            due_date: model.due_date,
            estimated_time: model.estimated_time,
            time_spent: model.time_spent,
            project_id: model.project_id,
            assigned_user_id: model.assigned_user_id,
            creator_id: model.creator_id,
            parent_task_id: model.parent_task_id,
            assignment_date: model.assignment_date,
            created_at: model.created_at,
        }
    }
}

/// 単一タスク取得用の詳細ビュー
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDetailDto {
    #[serde(flatten)]
    pub task: TaskDto,
    pub assigned_user: Option<SafeUser>,
    pub creator: Option<SafeUser>,
    pub comments: Vec<CommentDto>,
    pub attachments: Vec<AttachmentDto>,
    pub subtasks: Vec<TaskDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto(estimated_time: f64) -> CreateTaskDto {
        CreateTaskDto {
            description: "Write the report".to_string(),
            details: None,
            due_date: None,
            priority: TaskPriority::default(),
            estimated_time,
            project_id: Uuid::new_v4(),
            assigned_user_id: None,
            parent_task_id: None,
        }
    }

    #[test]
    fn test_create_task_defaults() {
        let json = format!(
            r#"{{"description": "T1", "project_id": "{}"}}"#,
            Uuid::new_v4()
        );
        let dto: CreateTaskDto = serde_json::from_str(&json).unwrap();
        assert_eq!(dto.priority, TaskPriority::Medium);
        assert_eq!(dto.estimated_time, 0.0);
        assert!(dto.assigned_user_id.is_none());
    }

    #[test]
    fn test_negative_estimated_time_rejected() {
        assert!(create_dto(-1.0).validate().is_err());
        assert!(create_dto(0.0).validate().is_ok());
    }

    #[test]
    fn test_update_task_dto_restricted_fields() {
        // 許可されていないフィールドはデシリアライズでも無視される
        let dto: UpdateTaskDto =
            serde_json::from_str(r#"{"status": "in_progress", "time_spent": 2.5}"#).unwrap();
        assert_eq!(dto.status, Some(TaskStatus::InProgress));
        assert_eq!(dto.time_spent, Some(2.5));
        assert!(dto.description.is_none());
    }

    #[test]
    fn test_task_dto_from_model_parses_enums() {
        let model = task_model::Model {
            id: Uuid::new_v4(),
            description: "T1".to_string(),
            details: None,
            status: "in_progress".to_string(),
            priority: "high".to_string(),
            due_date: None,
            estimated_time: 1.0,
            time_spent: 0.5,
            project_id: Uuid::new_v4(),
            assigned_user_id: None,
            creator_id: None,
            parent_task_id: None,
            assignment_date: None,
            created_at: Utc::now(),
        };

        let dto = TaskDto::from(model);
        assert_eq!(dto.status, TaskStatus::InProgress);
        assert_eq!(dto.priority, TaskPriority::High);
    }
}
