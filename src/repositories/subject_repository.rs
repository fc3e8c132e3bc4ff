use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::subject;

pub struct SubjectRepository {
    db: DatabaseConnection,
}

impl SubjectRepository {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub async fn find_by_id(&self, subject_id: Uuid) -> Result<Option<subject::Model>> {
        let subject = subject::Entity::find_by_id(subject_id).one(&self.db).await?;
        Ok(subject)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<subject::Model>> {
        let subject = subject::Entity::find()
            .filter(subject::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(subject)
    }

    pub async fn find_by_ids(&self, subject_ids: &[Uuid]) -> Result<Vec<subject::Model>> {
        if subject_ids.is_empty() {
            return Ok(Vec::new());
        }
        let subjects = subject::Entity::find()
            .filter(subject::Column::SubjectId.is_in(subject_ids.iter().copied()))
            .all(&self.db)
            .await?;
        Ok(subjects)
    }

    pub async fn find_all(&self) -> Result<Vec<subject::Model>> {
        let subjects = subject::Entity::find()
            .order_by_asc(subject::Column::Name)
            .all(&self.db)
            .await?;
        Ok(subjects)
    }

    pub async fn create(&self, subject_id: Uuid, name: String) -> Result<subject::Model> {
        let now = chrono::Utc::now().naive_utc();
        let subject_model = subject::ActiveModel {
            subject_id: Set(subject_id),
            name: Set(name),
            create_at: Set(now),
            update_at: Set(now),
        };
        let subject = subject_model.insert(&self.db).await?;
        Ok(subject)
    }

    pub async fn rename(&self, subject_id: Uuid, name: String) -> Result<Option<subject::Model>> {
        let Some(subject) = self.find_by_id(subject_id).await? else {
            return Ok(None);
        };

        let mut model = subject.into_active_model();
        model.name = Set(name);
        model.update_at = Set(chrono::Utc::now().naive_utc());

        let updated = model.update(&self.db).await?;
        Ok(Some(updated))
    }

    pub async fn delete(&self, subject_id: Uuid) -> Result<bool> {
        let result = subject::Entity::delete_by_id(subject_id)
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
