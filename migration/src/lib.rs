// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// ロール・ユーザー関連マイグレーション
mod m20250802_000001_create_roles_table;
mod m20250802_000002_create_users_table;
mod m20250802_000003_create_initial_admin;

// プロジェクト関連マイグレーション
mod m20250802_000004_create_projects_table;
mod m20250802_000005_create_project_members_table;

// タスク関連マイグレーション
mod m20250802_000006_create_tasks_table;
mod m20250802_000007_create_comments_table;
mod m20250802_000008_create_attachments_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. ロールテーブル作成と初期ロール投入（依存関係なし）
            Box::new(m20250802_000001_create_roles_table::Migration),
            // 2. ユーザーテーブル（rolesテーブルに依存）
            Box::new(m20250802_000002_create_users_table::Migration),
            // 3. 初期管理者ユーザー作成
            Box::new(m20250802_000003_create_initial_admin::Migration),
            // 4. プロジェクトと参加者（usersテーブルに依存）
            Box::new(m20250802_000004_create_projects_table::Migration),
            Box::new(m20250802_000005_create_project_members_table::Migration),
            // 5. タスクとその子テーブル
            Box::new(m20250802_000006_create_tasks_table::Migration),
            Box::new(m20250802_000007_create_comments_table::Migration),
            Box::new(m20250802_000008_create_attachments_table::Migration),
        ]
    }
}
