use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tasks::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tasks::Description).text().not_null())
                    .col(ColumnDef::new(Tasks::Details).text().null())
                    .col(
                        ColumnDef::new(Tasks::Status)
                            .string_len(20)
                            .not_null()
                            .default("new"),
                    )
                    .col(
                        ColumnDef::new(Tasks::Priority)
                            .string_len(20)
                            .not_null()
                            .default("medium"),
                    )
                    .col(ColumnDef::new(Tasks::DueDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Tasks::EstimatedTime)
                            .double()
                            .not_null()
                            .default(0.0)
                            .check(Expr::col(Tasks::EstimatedTime).gte(0.0)),
                    )
                    .col(
                        ColumnDef::new(Tasks::TimeSpent)
                            .double()
                            .not_null()
                            .default(0.0)
                            .check(Expr::col(Tasks::TimeSpent).gte(0.0)),
                    )
                    .col(ColumnDef::new(Tasks::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(Tasks::AssignedUserId).uuid().null())
                    .col(ColumnDef::new(Tasks::CreatorId).uuid().null())
                    .col(ColumnDef::new(Tasks::ParentTaskId).uuid().null())
                    .col(ColumnDef::new(Tasks::AssignmentDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Tasks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Add foreign key constraints separately
        // プロジェクト削除でタスクも削除
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_tasks_project_id")
                    .from(Tasks::Table, Tasks::ProjectId)
                    .to(Projects::Table, Projects::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        // 担当者・作成者の削除は参照を NULL にする（タスク自体は残す）
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_tasks_assigned_user_id")
                    .from(Tasks::Table, Tasks::AssignedUserId)
                    .to(Users::Table, Users::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_tasks_creator_id")
                    .from(Tasks::Table, Tasks::CreatorId)
                    .to(Users::Table, Users::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        // 親タスク削除でサブタスクも削除（自己参照）
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_tasks_parent_task_id")
                    .from(Tasks::Table, Tasks::ParentTaskId)
                    .to(Tasks::Table, Tasks::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        // Add indexes separately
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tasks_project_id")
                    .table(Tasks::Table)
                    .col(Tasks::ProjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tasks_assigned_user_id")
                    .table(Tasks::Table)
                    .col(Tasks::AssignedUserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tasks_parent_task_id")
                    .table(Tasks::Table)
                    .col(Tasks::ParentTaskId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tasks_status")
                    .table(Tasks::Table)
                    .col(Tasks::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for idx in [
            "idx_tasks_status",
            "idx_tasks_parent_task_id",
            "idx_tasks_assigned_user_id",
            "idx_tasks_project_id",
        ] {
            manager
                .drop_index(Index::drop().if_exists().name(idx).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Tasks {
    Table,
    Id,
    Description,
    Details,
    Status,
    Priority,
    DueDate,
    EstimatedTime,
    TimeSpent,
    ProjectId,
    AssignedUserId,
    CreatorId,
    ParentTaskId,
    AssignmentDate,
    CreatedAt,
}

#[derive(Iden)]
enum Projects {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
