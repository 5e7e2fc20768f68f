// src/api/dto/attachment_dto.rs
use crate::domain::attachment_model;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentDto {
    pub id: Uuid,
    pub filename: String,
    pub file_url: String,
    pub task_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<attachment_model::Model> for AttachmentDto {
    fn from(model: attachment_model::Model) -> Self {
        Self {
            id: model.id,
            filename: model.filename,
            file_url: model.file_url,
            task_id: model.task_id,
            created_at: model.created_at,
        }
    }
}
