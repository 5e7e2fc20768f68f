// src/api/dto/project_dto.rs
use crate::api::dto::task_dto::TaskDto;
use crate::domain::project_model;
use crate::domain::user_model::SafeUser;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProjectDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: String,

    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddParticipantDto {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignLeaderDto {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub leader_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<project_model::Model> for ProjectDto {
    fn from(model: project_model::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            leader_id: model.leader_id,
            created_at: model.created_at,
        }
    }
}

/// プロジェクト詳細ビュー
///
/// 参加者には、明示的に登録されたメンバーとタスク担当者の和集合が入る。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetailDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub leader: Option<SafeUser>,
    pub tasks: Vec<TaskDto>,
    pub participants: Vec<SafeUser>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_project_dto_validation() {
        let valid = CreateProjectDto {
            name: "P1".to_string(),
            description: None,
        };
        assert!(valid.validate().is_ok());

        let empty_name = CreateProjectDto {
            name: "".to_string(),
            description: None,
        };
        assert!(empty_name.validate().is_err());
    }
}
