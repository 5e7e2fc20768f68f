// src/repository/task_repository.rs
use crate::domain::task_model::{self, ActiveModel as TaskActiveModel, Entity as TaskEntity};
use crate::domain::task_status::TaskStatus;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{entity::*, query::*, DbConn, DbErr, DeleteResult};
use sea_orm::{PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

pub struct TaskRepository {
    db: DbConn,
}

impl TaskRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn create(&self, task: TaskActiveModel) -> Result<task_model::Model, DbErr> {
        task.insert(&self.db).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<task_model::Model>, DbErr> {
        TaskEntity::find_by_id(id).one(&self.db).await
    }

    pub async fn find_all_paginated(
        &self,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<task_model::Model>, DbErr> {
        // 過大なページサイズを防止
        let limit = std::cmp::min(limit, 100);

        TaskEntity::find()
            .order_by_desc(task_model::Column::CreatedAt)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await
    }

    /// 担当者に割り当てられたタスクのみを取得
    pub async fn find_for_assignee_paginated(
        &self,
        assigned_user_id: Uuid,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<task_model::Model>, DbErr> {
        let limit = std::cmp::min(limit, 100);

        TaskEntity::find()
            .filter(task_model::Column::AssignedUserId.eq(assigned_user_id))
            .order_by_desc(task_model::Column::CreatedAt)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await
    }

    pub async fn find_by_project(&self, project_id: Uuid) -> Result<Vec<task_model::Model>, DbErr> {
        TaskEntity::find()
            .filter(task_model::Column::ProjectId.eq(project_id))
            .order_by_asc(task_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn find_subtasks(&self, parent_task_id: Uuid) -> Result<Vec<task_model::Model>, DbErr> {
        TaskEntity::find()
            .filter(task_model::Column::ParentTaskId.eq(parent_task_id))
            .order_by_asc(task_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// タスク説明文の部分一致検索（大文字小文字を区別しない）
    pub async fn search_by_description(
        &self,
        query: &str,
    ) -> Result<Vec<task_model::Model>, DbErr> {
        TaskEntity::find()
            .filter(Expr::col(task_model::Column::Description).ilike(format!("%{}%", query)))
            .order_by_desc(task_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// 部分更新：Set されたフィールドのみ保存する
    pub async fn update(&self, task: TaskActiveModel) -> Result<task_model::Model, DbErr> {
        task.update(&self.db).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<DeleteResult, DbErr> {
        TaskEntity::delete_by_id(id).exec(&self.db).await
    }

    /// ステータス別のタスク数を集計（project_id を指定すると絞り込み）
    pub async fn count_by_status(
        &self,
        status: Option<TaskStatus>,
        project_id: Option<Uuid>,
    ) -> Result<u64, DbErr> {
        let mut query = TaskEntity::find();

        if let Some(status) = status {
            query = query.filter(task_model::Column::Status.eq(status.as_str()));
        }

        if let Some(project_id) = project_id {
            query = query.filter(task_model::Column::ProjectId.eq(project_id));
        }

        query.count(&self.db).await
    }
}
