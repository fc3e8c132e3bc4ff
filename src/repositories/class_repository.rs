use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::class;

#[derive(Debug, Default)]
pub struct ClassUpdate {
    pub name: Option<String>,
    pub academic_year: Option<String>,
}

pub struct ClassRepository {
    db: DatabaseConnection,
}

impl ClassRepository {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub async fn find_by_id(&self, class_id: Uuid) -> Result<Option<class::Model>> {
        let class = class::Entity::find_by_id(class_id).one(&self.db).await?;
        Ok(class)
    }

    pub async fn find_all_owned_by(&self, teacher_id: Uuid) -> Result<Vec<class::Model>> {
        let classes = class::Entity::find()
            .filter(class::Column::TeacherId.eq(teacher_id))
            .order_by_asc(class::Column::Name)
            .all(&self.db)
            .await?;
        Ok(classes)
    }

    pub async fn create(
        &self,
        class_id: Uuid,
        name: String,
        teacher_id: Uuid,
        academic_year: String,
    ) -> Result<class::Model> {
        let now = chrono::Utc::now().naive_utc();
        let class_model = class::ActiveModel {
            class_id: Set(class_id),
            name: Set(name),
            teacher_id: Set(teacher_id),
            academic_year: Set(academic_year),
            create_at: Set(now),
            update_at: Set(now),
        };
        let class = class_model.insert(&self.db).await?;
        Ok(class)
    }

    pub async fn update(&self, class_id: Uuid, update: ClassUpdate) -> Result<Option<class::Model>> {
        let Some(class) = self.find_by_id(class_id).await? else {
            return Ok(None);
        };

        let mut model = class.into_active_model();
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(academic_year) = update.academic_year {
            model.academic_year = Set(academic_year);
        }
        model.update_at = Set(chrono::Utc::now().naive_utc());

        let updated = model.update(&self.db).await?;
        Ok(Some(updated))
    }
}
