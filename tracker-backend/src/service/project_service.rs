// src/service/project_service.rs
use crate::api::dto::project_dto::{CreateProjectDto, ProjectDetailDto, ProjectDto};
use crate::api::dto::task_dto::TaskDto;
use crate::db::DbPool;
use crate::domain::role_model::RoleName;
use crate::error::{AppError, AppResult};
use crate::repository::project_repository::ProjectRepository;
use crate::repository::role_repository::RoleRepository;
use crate::repository::task_repository::TaskRepository;
use crate::repository::user_repository::UserRepository;
use crate::with_transaction;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// プロジェクト管理サービス
pub struct ProjectService {
    db: DbPool,
    repo: Arc<ProjectRepository>,
    user_repo: Arc<UserRepository>,
    task_repo: Arc<TaskRepository>,
    role_repo: Arc<RoleRepository>,
}

impl ProjectService {
    pub fn new(
        db: DbPool,
        repo: Arc<ProjectRepository>,
        user_repo: Arc<UserRepository>,
        task_repo: Arc<TaskRepository>,
        role_repo: Arc<RoleRepository>,
    ) -> Self {
        Self {
            db,
            repo,
            user_repo,
            task_repo,
            role_repo,
        }
    }

    /// プロジェクト作成（名前は一意）
    pub async fn create_project(&self, payload: CreateProjectDto) -> AppResult<ProjectDto> {
        payload.validate()?;

        if self.repo.find_by_name(&payload.name).await?.is_some() {
            return Err(AppError::Conflict(
                "Project name is already in use".to_string(),
            ));
        }

        let project = self.repo.create(payload.name, payload.description).await?;

        info!(project_id = %project.id, name = %project.name, "Project created");

        Ok(project.into())
    }

    pub async fn get_project(&self, id: Uuid) -> AppResult<ProjectDto> {
        let project = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project with id {} not found", id)))?;

        Ok(project.into())
    }

    /// プロジェクト詳細ビュー
    ///
    /// タスク一覧と、登録済み参加者∪タスク担当者の和集合を集約する。
    pub async fn get_project_detail(&self, id: Uuid) -> AppResult<ProjectDetailDto> {
        let project = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project with id {} not found", id)))?;

        let tasks = self.task_repo.find_by_project(id).await?;
        let member_ids = self.repo.find_member_user_ids(id).await?;

        // 参加者 = 明示的に登録されたメンバー ∪ タスク担当者
        let mut participant_ids: HashSet<Uuid> = member_ids.into_iter().collect();
        for task in &tasks {
            if let Some(assignee) = task.assigned_user_id {
                participant_ids.insert(assignee);
            }
        }

        let roles = self.role_map().await?;

        let participants = self
            .user_repo
            .find_by_ids(participant_ids.into_iter().collect())
            .await?
            .into_iter()
            .filter_map(|user| {
                let role = roles.get(&user.role_id).copied()?;
                Some(user.to_safe_user(role))
            })
            .collect();

        let leader = match project.leader_id {
            Some(leader_id) => {
                let user = self.user_repo.find_by_id(leader_id).await?;
                user.and_then(|u| {
                    let role = roles.get(&u.role_id).copied()?;
                    Some(u.to_safe_user(role))
                })
            }
            None => None,
        };

        Ok(ProjectDetailDto {
            id: project.id,
            name: project.name,
            description: project.description,
            created_at: project.created_at,
            leader,
            tasks: tasks.into_iter().map(TaskDto::from).collect(),
            participants,
        })
    }

    pub async fn list_projects(&self) -> AppResult<Vec<ProjectDto>> {
        let projects = self.repo.find_all().await?;
        Ok(projects.into_iter().map(Into::into).collect())
    }

    /// プロジェクト削除（タスクはFKカスケードで削除される）
    pub async fn delete_project(&self, id: Uuid) -> AppResult<()> {
        let result = self.repo.delete(id).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!(
                "Project with id {} not found",
                id
            )));
        }

        info!(project_id = %id, "Project deleted");

        Ok(())
    }

    /// 参加者追加
    ///
    /// 既に参加している場合は何もしない（冪等）。存在チェックと挿入は
    /// 同時リクエストで更新が失われないよう単一トランザクションで行う。
    pub async fn add_participant(&self, project_id: Uuid, user_id: Uuid) -> AppResult<()> {
        with_transaction!(&self.db, |txn| async move {
            let project = ProjectRepository::find_by_id_on(txn, project_id).await?;
            if project.is_none() {
                return Err(AppError::NotFound(format!(
                    "Project with id {} not found",
                    project_id
                )));
            }

            let user = UserRepository::find_by_id_on(txn, user_id).await?;
            if user.is_none() {
                return Err(AppError::NotFound(format!(
                    "User with id {} not found",
                    user_id
                )));
            }

            if ProjectRepository::is_member_on(txn, project_id, user_id).await? {
                // 冪等：既に参加済みなら成功として扱う
                return Ok(());
            }

            ProjectRepository::insert_member_on(txn, project_id, user_id).await?;
            Ok(())
        })?;

        info!(project_id = %project_id, user_id = %user_id, "Participant added");

        Ok(())
    }

    /// 参加者削除
    pub async fn remove_participant(&self, project_id: Uuid, user_id: Uuid) -> AppResult<()> {
        self.repo
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project with id {} not found", project_id)))?;

        self.repo.remove_member(project_id, user_id).await?;

        info!(project_id = %project_id, user_id = %user_id, "Participant removed");

        Ok(())
    }

    /// リーダー割り当て
    ///
    /// プロジェクトとユーザーの存在確認から更新までを単一トランザクションで行う。
    pub async fn assign_leader(&self, project_id: Uuid, user_id: Uuid) -> AppResult<ProjectDto> {
        let updated = with_transaction!(&self.db, |txn| async move {
            let project = ProjectRepository::find_by_id_on(txn, project_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Project with id {} not found", project_id))
                })?;

            UserRepository::find_by_id_on(txn, user_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", user_id)))?;

            let updated = ProjectRepository::set_leader_on(txn, project, user_id).await?;
            Ok(updated)
        })?;

        info!(project_id = %project_id, leader_id = %user_id, "Project leader assigned");

        Ok(updated.into())
    }

    /// プロジェクト名の部分一致検索（大文字小文字を区別しない）
    pub async fn search_projects(&self, query: &str) -> AppResult<Vec<ProjectDto>> {
        let projects = self.repo.search_by_name(query).await?;
        Ok(projects.into_iter().map(Into::into).collect())
    }

    async fn role_map(&self) -> AppResult<HashMap<Uuid, RoleName>> {
        let roles = self.role_repo.find_all().await?;
        Ok(roles
            .into_iter()
            .filter_map(|r| Some((r.id, RoleName::from_str(&r.name)?)))
            .collect())
    }
}
