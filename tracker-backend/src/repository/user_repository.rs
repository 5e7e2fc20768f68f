// src/repository/user_repository.rs
use crate::domain::user_model::{self, ActiveModel as UserActiveModel, Entity as UserEntity};
use sea_orm::{entity::*, query::*, ConnectionTrait, DbConn, DbErr, DeleteResult, Set};
use sea_orm::{PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

pub struct UserRepository {
    db: DbConn,
}

impl UserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        username: String,
        full_name: Option<String>,
        email: Option<String>,
        password_hash: String,
        role_id: Uuid,
    ) -> Result<user_model::Model, DbErr> {
        let user = UserActiveModel {
            username: Set(username),
            full_name: Set(full_name),
            email: Set(email),
            password_hash: Set(password_hash),
            role_id: Set(role_id),
            ..UserActiveModel::new()
        };

        user.insert(&self.db).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<user_model::Model>, DbErr> {
        UserEntity::find_by_id(id).one(&self.db).await
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<user_model::Model>, DbErr> {
        UserEntity::find()
            .filter(user_model::Column::Username.eq(username))
            .one(&self.db)
            .await
    }

    pub async fn find_by_ids(&self, ids: Vec<Uuid>) -> Result<Vec<user_model::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        UserEntity::find()
            .filter(user_model::Column::Id.is_in(ids))
            .all(&self.db)
            .await
    }

    pub async fn find_all(&self) -> Result<Vec<user_model::Model>, DbErr> {
        UserEntity::find()
            .order_by_asc(user_model::Column::Username)
            .all(&self.db)
            .await
    }

    pub async fn is_username_taken(&self, username: &str) -> Result<bool, DbErr> {
        let count = UserEntity::find()
            .filter(user_model::Column::Username.eq(username))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    pub async fn is_email_taken(&self, email: &str) -> Result<bool, DbErr> {
        let count = UserEntity::find()
            .filter(user_model::Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    /// 部分更新：Set されたフィールドのみ保存する
    pub async fn update(&self, user: UserActiveModel) -> Result<user_model::Model, DbErr> {
        user.update(&self.db).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<DeleteResult, DbErr> {
        UserEntity::delete_by_id(id).exec(&self.db).await
    }

    // --- トランザクション内から呼び出す read-check-write 用ヘルパー ---

    pub async fn find_by_id_on<C: ConnectionTrait>(
        conn: &C,
        id: Uuid,
    ) -> Result<Option<user_model::Model>, DbErr> {
        UserEntity::find_by_id(id).one(conn).await
    }
}
