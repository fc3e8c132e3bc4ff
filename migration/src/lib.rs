pub use sea_orm_migration::prelude::*;

mod m20260602_101500_create_table_teachers_users;
mod m20260603_142200_create_table_classes_subjects;
mod m20260604_091800_create_table_students_parents;
mod m20260608_133000_create_table_grades;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260602_101500_create_table_teachers_users::Migration),
            Box::new(m20260603_142200_create_table_classes_subjects::Migration),
            Box::new(m20260604_091800_create_table_students_parents::Migration),
            Box::new(m20260608_133000_create_table_grades::Migration),
        ]
    }
}
