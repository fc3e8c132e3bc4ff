pub mod class;
pub mod grade;
pub mod parent;
pub mod parent_child;
pub mod sea_orm_active_enums;
pub mod student;
pub mod subject;
pub mod teacher;
pub mod user;
