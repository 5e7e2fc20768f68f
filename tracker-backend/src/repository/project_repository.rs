// src/repository/project_repository.rs
use crate::domain::project_member_model::{
    self, ActiveModel as ProjectMemberActiveModel, Entity as ProjectMemberEntity,
};
use crate::domain::project_model::{
    self, ActiveModel as ProjectActiveModel, Entity as ProjectEntity,
};
use chrono::Utc;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{entity::*, query::*, ConnectionTrait, DbConn, DbErr, DeleteResult, Set};
use sea_orm::{PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

pub struct ProjectRepository {
    db: DbConn,
}

impl ProjectRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        name: String,
        description: Option<String>,
    ) -> Result<project_model::Model, DbErr> {
        let project = ProjectActiveModel {
            name: Set(name),
            description: Set(description),
            ..ProjectActiveModel::new()
        };

        project.insert(&self.db).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<project_model::Model>, DbErr> {
        ProjectEntity::find_by_id(id).one(&self.db).await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<project_model::Model>, DbErr> {
        ProjectEntity::find()
            .filter(project_model::Column::Name.eq(name))
            .one(&self.db)
            .await
    }

    pub async fn find_all(&self) -> Result<Vec<project_model::Model>, DbErr> {
        ProjectEntity::find()
            .order_by_desc(project_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// プロジェクト名の部分一致検索（大文字小文字を区別しない）
    pub async fn search_by_name(&self, query: &str) -> Result<Vec<project_model::Model>, DbErr> {
        ProjectEntity::find()
            .filter(Expr::col(project_model::Column::Name).ilike(format!("%{}%", query)))
            .order_by_desc(project_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<DeleteResult, DbErr> {
        ProjectEntity::delete_by_id(id).exec(&self.db).await
    }

    /// プロジェクト参加者のユーザーIDを取得
    pub async fn find_member_user_ids(&self, project_id: Uuid) -> Result<Vec<Uuid>, DbErr> {
        let members = ProjectMemberEntity::find()
            .filter(project_member_model::Column::ProjectId.eq(project_id))
            .all(&self.db)
            .await?;

        Ok(members.into_iter().map(|m| m.user_id).collect())
    }

    pub async fn remove_member(
        &self,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<DeleteResult, DbErr> {
        ProjectMemberEntity::delete_many()
            .filter(project_member_model::Column::ProjectId.eq(project_id))
            .filter(project_member_model::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
    }

    // --- トランザクション内から呼び出す read-check-write 用ヘルパー ---

    pub async fn find_by_id_on<C: ConnectionTrait>(
        conn: &C,
        id: Uuid,
    ) -> Result<Option<project_model::Model>, DbErr> {
        ProjectEntity::find_by_id(id).one(conn).await
    }

    pub async fn is_member_on<C: ConnectionTrait>(
        conn: &C,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, DbErr> {
        let count = ProjectMemberEntity::find()
            .filter(project_member_model::Column::ProjectId.eq(project_id))
            .filter(project_member_model::Column::UserId.eq(user_id))
            .count(conn)
            .await?;
        Ok(count > 0)
    }

    pub async fn insert_member_on<C: ConnectionTrait>(
        conn: &C,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), DbErr> {
        let member = ProjectMemberActiveModel {
            project_id: Set(project_id),
            user_id: Set(user_id),
            joined_at: Set(Utc::now()),
        };

        ProjectMemberEntity::insert(member).exec(conn).await?;
        Ok(())
    }

    pub async fn set_leader_on<C: ConnectionTrait>(
        conn: &C,
        project: project_model::Model,
        leader_id: Uuid,
    ) -> Result<project_model::Model, DbErr> {
        let mut active: ProjectActiveModel = project.into();
        active.leader_id = Set(Some(leader_id));
        active.update(conn).await
    }
}
