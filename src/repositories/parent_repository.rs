use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{parent, parent_child};

pub struct ParentRepository {
    db: DatabaseConnection,
}

impl ParentRepository {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub async fn find_by_id(&self, parent_id: Uuid) -> Result<Option<parent::Model>> {
        let parent = parent::Entity::find_by_id(parent_id).one(&self.db).await?;
        Ok(parent)
    }

    pub async fn find_all_created_by(&self, teacher_id: Uuid) -> Result<Vec<parent::Model>> {
        let parents = parent::Entity::find()
            .filter(parent::Column::CreatedBy.eq(teacher_id))
            .order_by_asc(parent::Column::Name)
            .all(&self.db)
            .await?;
        Ok(parents)
    }

    pub async fn create(
        &self,
        parent_id: Uuid,
        name: String,
        email: Option<String>,
        phone: Option<String>,
        created_by: Uuid,
    ) -> Result<parent::Model> {
        let now = chrono::Utc::now().naive_utc();
        let parent_model = parent::ActiveModel {
            parent_id: Set(parent_id),
            name: Set(name),
            email: Set(email),
            phone: Set(phone),
            created_by: Set(created_by),
            create_at: Set(now),
            update_at: Set(now),
        };
        let parent = parent_model.insert(&self.db).await?;
        Ok(parent)
    }

    pub async fn link_child(&self, parent_id: Uuid, student_id: Uuid) -> Result<()> {
        let link = parent_child::ActiveModel {
            parent_id: Set(parent_id),
            student_id: Set(student_id),
            create_at: Set(chrono::Utc::now().naive_utc()),
        };
        link.insert(&self.db).await?;
        Ok(())
    }

    /// Student ids linked to the parent, the parent's entire read scope.
    pub async fn children_of(&self, parent_id: Uuid) -> Result<Vec<Uuid>> {
        let links = parent_child::Entity::find()
            .filter(parent_child::Column::ParentId.eq(parent_id))
            .all(&self.db)
            .await?;
        Ok(links.into_iter().map(|link| link.student_id).collect())
    }
}
