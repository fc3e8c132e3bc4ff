use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Role enum shared by user accounts
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("role"))
                    .values([
                        Alias::new("teacher"),
                        Alias::new("student"),
                        Alias::new("parent"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teachers::TeacherId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(Teachers::Name).string().not_null())
                    .col(ColumnDef::new(Teachers::Email).string().not_null())
                    .col(ColumnDef::new(Teachers::Phone).string().null())
                    .col(
                        ColumnDef::new(Teachers::CreateAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Teachers::UpdateAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .to_owned(),
            )
            .await?;

        // Login accounts. The profile references for students and parents are
        // added once those tables exist (later migration); teacher_id can be
        // wired up immediately.
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::UserId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .custom(Alias::new("role"))
                            .not_null(),
                    )
                    .col(ColumnDef::new(Users::TeacherId).uuid().null())
                    .col(ColumnDef::new(Users::StudentId).uuid().null())
                    .col(ColumnDef::new(Users::ParentId).uuid().null())
                    .col(
                        ColumnDef::new(Users::CreateAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdateAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_teacher")
                            .from_tbl(Users::Table)
                            .from_col(Users::TeacherId)
                            .to_tbl(Teachers::Table)
                            .to_col(Teachers::TeacherId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("role")).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Teachers {
    Table,
    TeacherId,
    Name,
    Email,
    Phone,
    CreateAt,
    UpdateAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    UserId,
    Email,
    Password,
    Role,
    TeacherId,
    StudentId,
    ParentId,
    CreateAt,
    UpdateAt,
}
