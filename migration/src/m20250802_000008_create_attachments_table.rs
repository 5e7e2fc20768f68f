use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attachments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attachments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Attachments::Filename)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Attachments::FileUrl).text().not_null())
                    .col(ColumnDef::new(Attachments::TaskId).uuid().not_null())
                    .col(
                        ColumnDef::new(Attachments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // タスク削除で添付ファイルのレコードも削除
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_attachments_task_id")
                    .from(Attachments::Table, Attachments::TaskId)
                    .to(Tasks::Table, Tasks::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attachments_task_id")
                    .table(Attachments::Table)
                    .col(Attachments::TaskId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .name("idx_attachments_task_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Attachments::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Attachments {
    Table,
    Id,
    Filename,
    FileUrl,
    TaskId,
    CreatedAt,
}

#[derive(Iden)]
enum Tasks {
    Table,
    Id,
}
