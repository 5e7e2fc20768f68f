// src/repository/comment_repository.rs
use crate::domain::comment_model::{
    self, ActiveModel as CommentActiveModel, Entity as CommentEntity,
};
use sea_orm::{entity::*, query::*, DbConn, DbErr, Set};
use sea_orm::{QueryFilter, QueryOrder};
use uuid::Uuid;

pub struct CommentRepository {
    db: DbConn,
}

impl CommentRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        content: String,
        user_id: Uuid,
        task_id: Uuid,
    ) -> Result<comment_model::Model, DbErr> {
        let comment = CommentActiveModel {
            content: Set(content),
            user_id: Set(user_id),
            task_id: Set(task_id),
            ..CommentActiveModel::new()
        };

        comment.insert(&self.db).await
    }

    /// タスクのコメントを作成日時の昇順で取得
    pub async fn find_by_task(&self, task_id: Uuid) -> Result<Vec<comment_model::Model>, DbErr> {
        CommentEntity::find()
            .filter(comment_model::Column::TaskId.eq(task_id))
            .order_by_asc(comment_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }
}
