// src/repository/attachment_repository.rs
use crate::domain::attachment_model::{
    self, ActiveModel as AttachmentActiveModel, Entity as AttachmentEntity,
};
use sea_orm::{entity::*, query::*, DbConn, DbErr, DeleteResult, Set};
use sea_orm::{QueryFilter, QueryOrder};
use uuid::Uuid;

pub struct AttachmentRepository {
    db: DbConn,
}

impl AttachmentRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        filename: String,
        file_url: String,
        task_id: Uuid,
    ) -> Result<attachment_model::Model, DbErr> {
        let attachment = AttachmentActiveModel {
            filename: Set(filename),
            file_url: Set(file_url),
            task_id: Set(task_id),
            ..AttachmentActiveModel::new()
        };

        attachment.insert(&self.db).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<attachment_model::Model>, DbErr> {
        AttachmentEntity::find_by_id(id).one(&self.db).await
    }

    pub async fn find_by_task(&self, task_id: Uuid) -> Result<Vec<attachment_model::Model>, DbErr> {
        AttachmentEntity::find()
            .filter(attachment_model::Column::TaskId.eq(task_id))
            .order_by_asc(attachment_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<DeleteResult, DbErr> {
        AttachmentEntity::delete_by_id(id).exec(&self.db).await
    }
}
