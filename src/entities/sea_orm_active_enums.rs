//! `SeaORM` active enums shared across entities

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "role")]
#[serde(rename_all = "lowercase")]
pub enum RoleEnum {
    #[sea_orm(string_value = "teacher")]
    Teacher,
    #[sea_orm(string_value = "student")]
    Student,
    #[sea_orm(string_value = "parent")]
    Parent,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "exam_type")]
#[serde(rename_all = "lowercase")]
pub enum ExamTypeEnum {
    #[sea_orm(string_value = "quiz")]
    Quiz,
    #[sea_orm(string_value = "midterm")]
    Midterm,
    #[sea_orm(string_value = "final")]
    Final,
    #[sea_orm(string_value = "assignment")]
    Assignment,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "term")]
pub enum TermEnum {
    #[sea_orm(string_value = "1st")]
    #[serde(rename = "1st")]
    First,
    #[sea_orm(string_value = "2nd")]
    #[serde(rename = "2nd")]
    Second,
    #[sea_orm(string_value = "3rd")]
    #[serde(rename = "3rd")]
    Third,
}
