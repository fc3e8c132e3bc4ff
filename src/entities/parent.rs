//! `SeaORM` Entity for parents table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(skip_deserializing)]
    pub parent_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_by: Uuid,
    pub create_at: DateTime,
    pub update_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teacher::Entity",
        from = "Column::CreatedBy",
        to = "super::teacher::Column::TeacherId"
    )]
    Teacher,
    #[sea_orm(has_many = "super::parent_child::Entity")]
    ParentChildren,
}

impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::parent_child::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParentChildren.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
