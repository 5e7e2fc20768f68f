// src/middleware/authorization.rs

//! ロール・所有権チェックの集約
//!
//! ハンドラーやサービスはここの述語だけを使い、ロール文字列の比較を
//! 各所で書き直さない。

use crate::domain::role_model::RoleName;
use crate::domain::task_model;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use uuid::Uuid;

/// ユーザーのロールが許可リストに含まれることを要求する
pub fn require_role(user: &AuthenticatedUser, allowed_roles: &[RoleName]) -> AppResult<()> {
    if allowed_roles.contains(&user.role) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Insufficient permissions for this operation".to_string(),
        ))
    }
}

/// タスク・プロジェクトの管理操作（admin または manager）を要求する
pub fn require_manage(user: &AuthenticatedUser) -> AppResult<()> {
    require_role(user, &[RoleName::Admin, RoleName::Manager])
}

/// 管理者、または対象ユーザー本人であることを要求する
pub fn require_admin_or_self(user: &AuthenticatedUser, target_user_id: Uuid) -> AppResult<()> {
    if user.is_admin() || user.user_id == target_user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Insufficient permissions for this operation".to_string(),
        ))
    }
}

/// タスク更新の権限チェック
///
/// admin/manager は常に許可。executor は自分に割り当てられたタスクのみ。
pub fn require_task_update(user: &AuthenticatedUser, task: &task_model::Model) -> AppResult<()> {
    if user.role.can_manage() {
        return Ok(());
    }

    if task.assigned_user_id == Some(user.user_id) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Task is not assigned to you".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user_with_role(role: RoleName) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: Uuid::new_v4(),
            username: "tester".to_string(),
            role,
        }
    }

    fn task_assigned_to(user_id: Option<Uuid>) -> task_model::Model {
        task_model::Model {
            id: Uuid::new_v4(),
            description: "T1".to_string(),
            details: None,
            status: "new".to_string(),
            priority: "medium".to_string(),
            due_date: None,
            estimated_time: 0.0,
            time_spent: 0.0,
            project_id: Uuid::new_v4(),
            assigned_user_id: user_id,
            creator_id: None,
            parent_task_id: None,
            assignment_date: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_require_role() {
        let manager = user_with_role(RoleName::Manager);
        assert!(require_role(&manager, &[RoleName::Admin, RoleName::Manager]).is_ok());
        assert!(require_role(&manager, &[RoleName::Admin]).is_err());
    }

    #[test]
    fn test_require_manage() {
        assert!(require_manage(&user_with_role(RoleName::Admin)).is_ok());
        assert!(require_manage(&user_with_role(RoleName::Manager)).is_ok());
        assert!(require_manage(&user_with_role(RoleName::Executor)).is_err());
    }

    #[test]
    fn test_require_admin_or_self() {
        let executor = user_with_role(RoleName::Executor);
        assert!(require_admin_or_self(&executor, executor.user_id).is_ok());
        assert!(require_admin_or_self(&executor, Uuid::new_v4()).is_err());

        let admin = user_with_role(RoleName::Admin);
        assert!(require_admin_or_self(&admin, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_require_task_update_for_assignee() {
        let executor = user_with_role(RoleName::Executor);

        let own_task = task_assigned_to(Some(executor.user_id));
        assert!(require_task_update(&executor, &own_task).is_ok());

        // 他人のタスクは Forbidden
        let other_task = task_assigned_to(Some(Uuid::new_v4()));
        assert!(require_task_update(&executor, &other_task).is_err());

        let unassigned = task_assigned_to(None);
        assert!(require_task_update(&executor, &unassigned).is_err());
    }

    #[test]
    fn test_require_task_update_for_managers() {
        let other_task = task_assigned_to(Some(Uuid::new_v4()));
        assert!(require_task_update(&user_with_role(RoleName::Admin), &other_task).is_ok());
        assert!(require_task_update(&user_with_role(RoleName::Manager), &other_task).is_ok());
    }
}
