// src/api/dto/comment_dto.rs
use crate::domain::comment_model;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentDto {
    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDto {
    pub id: Uuid,
    pub content: String,
    pub user_id: Uuid,
    pub task_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<comment_model::Model> for CommentDto {
    fn from(model: comment_model::Model) -> Self {
        Self {
            id: model.id,
            content: model.content,
            user_id: model.user_id,
            task_id: model.task_id,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content_rejected() {
        let dto = CreateCommentDto {
            content: "".to_string(),
        };
        assert!(dto.validate().is_err());

        let dto = CreateCommentDto {
            content: "Looks good".to_string(),
        };
        assert!(dto.validate().is_ok());
    }
}
