use anyhow::Result;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use crate::entities::teacher;

pub struct TeacherRepository {
    db: DatabaseConnection,
}

impl TeacherRepository {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub async fn find_by_id(&self, teacher_id: Uuid) -> Result<Option<teacher::Model>> {
        let teacher = teacher::Entity::find_by_id(teacher_id).one(&self.db).await?;
        Ok(teacher)
    }

    pub async fn create(
        &self,
        teacher_id: Uuid,
        name: String,
        email: String,
        phone: Option<String>,
    ) -> Result<teacher::Model> {
        let now = chrono::Utc::now().naive_utc();
        let teacher_model = teacher::ActiveModel {
            teacher_id: Set(teacher_id),
            name: Set(name),
            email: Set(email),
            phone: Set(phone),
            create_at: Set(now),
            update_at: Set(now),
        };
        let teacher = teacher_model.insert(&self.db).await?;
        Ok(teacher)
    }
}
