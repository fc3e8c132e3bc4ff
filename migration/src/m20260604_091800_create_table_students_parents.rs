use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::StudentId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(Students::Name).string().not_null())
                    .col(
                        ColumnDef::new(Students::AdmNo)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::Email).string().null())
                    .col(ColumnDef::new(Students::ClassId).uuid().null())
                    .col(ColumnDef::new(Students::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Students::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Students::CreateAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Students::UpdateAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_students_class")
                            .from_tbl(Students::Table)
                            .from_col(Students::ClassId)
                            .to_tbl(Classes::Table)
                            .to_col(Classes::ClassId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_students_created_by")
                            .from_tbl(Students::Table)
                            .from_col(Students::CreatedBy)
                            .to_tbl(Teachers::Table)
                            .to_col(Teachers::TeacherId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Parents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Parents::ParentId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(Parents::Name).string().not_null())
                    .col(ColumnDef::new(Parents::Email).string().null())
                    .col(ColumnDef::new(Parents::Phone).string().null())
                    .col(ColumnDef::new(Parents::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Parents::CreateAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Parents::UpdateAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parents_created_by")
                            .from_tbl(Parents::Table)
                            .from_col(Parents::CreatedBy)
                            .to_tbl(Teachers::Table)
                            .to_col(Teachers::TeacherId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Parent -> student links, the only source of parent read scope
        manager
            .create_table(
                Table::create()
                    .table(ParentChildren::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ParentChildren::ParentId).uuid().not_null())
                    .col(ColumnDef::new(ParentChildren::StudentId).uuid().not_null())
                    .col(
                        ColumnDef::new(ParentChildren::CreateAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .primary_key(
                        Index::create()
                            .col(ParentChildren::ParentId)
                            .col(ParentChildren::StudentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parent_children_parent")
                            .from_tbl(ParentChildren::Table)
                            .from_col(ParentChildren::ParentId)
                            .to_tbl(Parents::Table)
                            .to_col(Parents::ParentId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parent_children_student")
                            .from_tbl(ParentChildren::Table)
                            .from_col(ParentChildren::StudentId)
                            .to_tbl(Students::Table)
                            .to_col(Students::StudentId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Wire user accounts to their student/parent profiles. Cascade so a
        // hard student delete also removes the login credentials.
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_users_student")
                    .from_tbl(Users::Table)
                    .from_col(Users::StudentId)
                    .to_tbl(Students::Table)
                    .to_col(Students::StudentId)
                    .on_delete(ForeignKeyAction::Cascade)
                    .on_update(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_users_parent")
                    .from_tbl(Users::Table)
                    .from_col(Users::ParentId)
                    .to_tbl(Parents::Table)
                    .to_col(Parents::ParentId)
                    .on_delete(ForeignKeyAction::Cascade)
                    .on_update(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name("fk_users_parent")
                    .table(Users::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name("fk_users_student")
                    .table(Users::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(ParentChildren::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Parents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Students {
    Table,
    StudentId,
    Name,
    AdmNo,
    Email,
    ClassId,
    CreatedBy,
    IsActive,
    CreateAt,
    UpdateAt,
}

#[derive(DeriveIden)]
enum Parents {
    Table,
    ParentId,
    Name,
    Email,
    Phone,
    CreatedBy,
    CreateAt,
    UpdateAt,
}

#[derive(DeriveIden)]
enum ParentChildren {
    Table,
    ParentId,
    StudentId,
    CreateAt,
}

#[derive(DeriveIden)]
enum Classes {
    Table,
    ClassId,
}

#[derive(DeriveIden)]
enum Teachers {
    Table,
    TeacherId,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    StudentId,
    ParentId,
}
