// src/domain/task_model.rs
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub details: Option<String>,

    pub status: String,

    pub priority: String,

    #[sea_orm(nullable)]
    pub due_date: Option<DateTime<Utc>>,

    pub estimated_time: f64,

    pub time_spent: f64,

    pub project_id: Uuid,

    #[sea_orm(nullable)]
    pub assigned_user_id: Option<Uuid>,

    #[sea_orm(nullable)]
    pub creator_id: Option<Uuid>,

    #[sea_orm(nullable)]
    pub parent_task_id: Option<Uuid>,

    #[sea_orm(nullable)]
    pub assignment_date: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project_model::Entity",
        from = "Column::ProjectId",
        to = "super::project_model::Column::Id"
    )]
    Project,

    #[sea_orm(
        belongs_to = "super::user_model::Entity",
        from = "Column::AssignedUserId",
        to = "super::user_model::Column::Id"
    )]
    AssignedUser,

    #[sea_orm(
        belongs_to = "super::user_model::Entity",
        from = "Column::CreatorId",
        to = "super::user_model::Column::Id"
    )]
    Creator,

    // 自己参照（サブタスク）
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentTaskId",
        to = "Column::Id"
    )]
    ParentTask,

    #[sea_orm(has_many = "super::comment_model::Entity")]
    Comments,

    #[sea_orm(has_many = "super::attachment_model::Entity")]
    Attachments,
}

impl Related<super::project_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::user_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignedUser.def()
    }
}

impl Related<super::comment_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<super::attachment_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attachments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            created_at: Set(Utc::now()),
            ..ActiveModelTrait::default()
        }
    }
}
