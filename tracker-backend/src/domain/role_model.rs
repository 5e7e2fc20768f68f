// src/domain/role_model.rs
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ロールエンティティ
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub name: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_model::Entity")]
    Users,
}

impl Related<super::user_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// ロール名を表すenum
///
/// 権限判定は必ずこのenumの値で行う。文字列はDBとの境界でのみ使用する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleName {
    Admin,
    Manager,
    Executor,
}

impl RoleName {
    /// ロール名を文字列として取得
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Admin => "admin",
            RoleName::Manager => "manager",
            RoleName::Executor => "executor",
        }
    }

    /// 文字列からロール名を解析
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(RoleName::Admin),
            "manager" => Some(RoleName::Manager),
            "executor" => Some(RoleName::Executor),
            _ => None,
        }
    }

    /// すべての有効なロールを取得
    pub fn all() -> Vec<Self> {
        vec![RoleName::Admin, RoleName::Manager, RoleName::Executor]
    }

    /// 管理者権限があるかチェック
    pub fn is_admin(&self) -> bool {
        matches!(self, RoleName::Admin)
    }

    /// マネージャー権限があるかチェック
    pub fn is_manager(&self) -> bool {
        matches!(self, RoleName::Manager)
    }

    /// タスク・プロジェクトの管理操作（作成・削除）が可能か
    pub fn can_manage(&self) -> bool {
        matches!(self, RoleName::Admin | RoleName::Manager)
    }
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RoleName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s).ok_or_else(|| format!("Invalid role name: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_conversion() {
        assert_eq!(RoleName::Admin.as_str(), "admin");
        assert_eq!(RoleName::Manager.as_str(), "manager");
        assert_eq!(RoleName::Executor.as_str(), "executor");

        assert_eq!(RoleName::from_str("admin"), Some(RoleName::Admin));
        assert_eq!(RoleName::from_str("ADMIN"), Some(RoleName::Admin));
        assert_eq!(RoleName::from_str("manager"), Some(RoleName::Manager));
        assert_eq!(RoleName::from_str("executor"), Some(RoleName::Executor));
        assert_eq!(RoleName::from_str("invalid"), None);
    }

    #[test]
    fn test_role_checks() {
        assert!(RoleName::Admin.is_admin());
        assert!(!RoleName::Manager.is_admin());
        assert!(!RoleName::Executor.is_admin());

        assert!(RoleName::Admin.can_manage());
        assert!(RoleName::Manager.can_manage());
        assert!(!RoleName::Executor.can_manage());
    }

    #[test]
    fn test_serde() {
        let serialized = serde_json::to_string(&RoleName::Executor).unwrap();
        assert_eq!(serialized, r#""executor""#);

        let deserialized: RoleName = serde_json::from_str(r#""manager""#).unwrap();
        assert_eq!(deserialized, RoleName::Manager);
    }
}
