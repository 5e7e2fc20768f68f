use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 初期管理者ユーザーを作成
        // パスワード: "admin123" をArgon2idでハッシュ化した値
        let admin_password_hash = "$argon2id$v=19$m=19456,t=2,p=1$G7Ch6qIZb2GldfeZSN95Tw$dcmN7SbI1x2yQta/Hu99lxrw4F5YTwYj0dyR3M0jy7w";

        // 再実行しても安全なように、username の衝突時は何もしない
        manager
            .exec_stmt(
                Query::insert()
                    .into_table(Users::Table)
                    .columns([
                        Users::Id,
                        Users::Username,
                        Users::PasswordHash,
                        Users::RoleId,
                    ])
                    .values_panic([
                        Expr::cust("gen_random_uuid()"),
                        "admin".into(),
                        admin_password_hash.into(),
                        Expr::cust("(SELECT id FROM roles WHERE name = 'admin')"),
                    ])
                    .on_conflict(OnConflict::column(Users::Username).do_nothing().to_owned())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 初期管理者ユーザーを削除
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Users::Table)
                    .and_where(Expr::col(Users::Username).eq("admin"))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
    RoleId,
}
