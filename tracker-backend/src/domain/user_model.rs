// src/domain/user_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub username: String,

    #[sea_orm(nullable)]
    pub full_name: Option<String>,

    #[sea_orm(unique, nullable)]
    pub email: Option<String>,

    #[serde(skip_serializing)] // パスワードハッシュは絶対にシリアライズしない
    pub password_hash: String,

    pub role_id: Uuid,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::role_model::Entity",
        from = "Column::RoleId",
        to = "super::role_model::Column::Id"
    )]
    Role,

    #[sea_orm(
        has_many = "super::task_model::Entity",
        from = "Column::Id",
        to = "super::task_model::Column::AssignedUserId"
    )]
    AssignedTasks,

    #[sea_orm(has_many = "super::comment_model::Entity")]
    Comments,

    #[sea_orm(has_many = "super::project_member_model::Entity")]
    ProjectMemberships,
}

impl Related<super::role_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl Related<super::comment_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<super::project_member_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectMemberships.def()
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

impl Model {
    /// パスワードハッシュを除いたセーフなユーザー情報を取得
    pub fn to_safe_user(&self, role_name: super::role_model::RoleName) -> SafeUser {
        SafeUser {
            id: self.id,
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            role: role_name,
            created_at: self.created_at,
        }
    }
}

/// パスワードハッシュを含まないセーフなユーザー表現
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeUser {
    pub id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: super::role_model::RoleName,
    pub created_at: DateTime<Utc>,
}
