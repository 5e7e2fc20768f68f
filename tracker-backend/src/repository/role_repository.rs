// src/repository/role_repository.rs
use crate::domain::role_model::{self, Entity as RoleEntity, RoleName};
use sea_orm::{entity::*, query::*, DbConn, DbErr};
use sea_orm::{QueryFilter, QueryOrder};
use uuid::Uuid;

pub struct RoleRepository {
    db: DbConn,
}

impl RoleRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<role_model::Model>, DbErr> {
        RoleEntity::find_by_id(id).one(&self.db).await
    }

    pub async fn find_by_name(&self, name: RoleName) -> Result<Option<role_model::Model>, DbErr> {
        RoleEntity::find()
            .filter(role_model::Column::Name.eq(name.as_str()))
            .one(&self.db)
            .await
    }

    pub async fn find_all(&self) -> Result<Vec<role_model::Model>, DbErr> {
        RoleEntity::find()
            .order_by_asc(role_model::Column::Name)
            .all(&self.db)
            .await
    }
}
