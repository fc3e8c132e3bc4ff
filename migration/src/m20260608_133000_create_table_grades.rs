use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("exam_type"))
                    .values([
                        Alias::new("quiz"),
                        Alias::new("midterm"),
                        Alias::new("final"),
                        Alias::new("assignment"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("term"))
                    .values([Alias::new("1st"), Alias::new("2nd"), Alias::new("3rd")])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grades::GradeId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(Grades::StudentId).uuid().not_null())
                    .col(ColumnDef::new(Grades::SubjectId).uuid().not_null())
                    .col(ColumnDef::new(Grades::ClassId).uuid().null())
                    .col(ColumnDef::new(Grades::TeacherId).uuid().not_null())
                    .col(ColumnDef::new(Grades::Score).double().not_null())
                    .col(
                        ColumnDef::new(Grades::MaxScore)
                            .double()
                            .not_null()
                            .default(100.0),
                    )
                    .col(ColumnDef::new(Grades::Percentage).double().not_null())
                    .col(ColumnDef::new(Grades::Letter).string().not_null())
                    .col(
                        ColumnDef::new(Grades::ExamType)
                            .custom(Alias::new("exam_type"))
                            .not_null()
                            .extra("DEFAULT 'quiz'".to_string()),
                    )
                    .col(
                        ColumnDef::new(Grades::Term)
                            .custom(Alias::new("term"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Grades::RecordedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_grades_student")
                            .from_tbl(Grades::Table)
                            .from_col(Grades::StudentId)
                            .to_tbl(Students::Table)
                            .to_col(Students::StudentId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_grades_subject")
                            .from_tbl(Grades::Table)
                            .from_col(Grades::SubjectId)
                            .to_tbl(Subjects::Table)
                            .to_col(Subjects::SubjectId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_grades_class")
                            .from_tbl(Grades::Table)
                            .from_col(Grades::ClassId)
                            .to_tbl(Classes::Table)
                            .to_col(Classes::ClassId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_grades_teacher")
                            .from_tbl(Grades::Table)
                            .from_col(Grades::TeacherId)
                            .to_tbl(Teachers::Table)
                            .to_col(Teachers::TeacherId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One grade per student/subject/term; concurrent writes are settled
        // here, not in process.
        manager
            .create_index(
                Index::create()
                    .name("idx_grades_student_subject_term")
                    .table(Grades::Table)
                    .col(Grades::StudentId)
                    .col(Grades::SubjectId)
                    .col(Grades::Term)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("term")).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("exam_type")).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Grades {
    Table,
    GradeId,
    StudentId,
    SubjectId,
    ClassId,
    TeacherId,
    Score,
    MaxScore,
    Percentage,
    Letter,
    ExamType,
    Term,
    RecordedAt,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    StudentId,
}

#[derive(DeriveIden)]
enum Subjects {
    Table,
    SubjectId,
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
