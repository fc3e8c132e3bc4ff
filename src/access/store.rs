//! sea-orm backed ownership lookups for the resolver.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use super::OwnershipLookup;
use crate::entities::{class, grade, parent_child, student};

#[derive(Clone)]
pub struct OwnershipStore {
    db: DatabaseConnection,
}

impl OwnershipStore {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }
}

impl OwnershipLookup for OwnershipStore {
    async fn student_owner(&self, student_id: Uuid) -> anyhow::Result<Option<Uuid>> {
        let student = student::Entity::find_by_id(student_id).one(&self.db).await?;
        Ok(student.map(|s| s.created_by))
    }

    async fn class_owner(&self, class_id: Uuid) -> anyhow::Result<Option<Uuid>> {
        let class = class::Entity::find_by_id(class_id).one(&self.db).await?;
        Ok(class.map(|c| c.teacher_id))
    }

    async fn grade_owner(&self, grade_id: Uuid) -> anyhow::Result<Option<Uuid>> {
        let Some(grade) = grade::Entity::find_by_id(grade_id).one(&self.db).await? else {
            return Ok(None);
        };
        self.student_owner(grade.student_id).await
    }

    async fn children_of(&self, parent_id: Uuid) -> anyhow::Result<Vec<Uuid>> {
        let links = parent_child::Entity::find()
            .filter(parent_child::Column::ParentId.eq(parent_id))
            .all(&self.db)
            .await?;
        Ok(links.into_iter().map(|link| link.student_id).collect())
    }
}
