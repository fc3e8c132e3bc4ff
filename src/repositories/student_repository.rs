use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::student;

/// Partial update; `created_by` is deliberately absent so ownership can
/// never be reassigned through the update path.
#[derive(Debug, Default)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub email: Option<Option<String>>,
    pub class_id: Option<Option<Uuid>>,
    pub is_active: Option<bool>,
}

pub struct StudentRepository {
    db: DatabaseConnection,
}

impl StudentRepository {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub async fn find_by_id(&self, student_id: Uuid) -> Result<Option<student::Model>> {
        let student = student::Entity::find_by_id(student_id).one(&self.db).await?;
        Ok(student)
    }

    pub async fn find_by_adm_no(&self, adm_no: &str) -> Result<Option<student::Model>> {
        let student = student::Entity::find()
            .filter(student::Column::AdmNo.eq(adm_no))
            .one(&self.db)
            .await?;
        Ok(student)
    }

    /// Active students created by one teacher, the scope every teacher
    /// listing is narrowed to.
    pub async fn find_all_created_by(&self, teacher_id: Uuid) -> Result<Vec<student::Model>> {
        let students = student::Entity::find()
            .filter(student::Column::CreatedBy.eq(teacher_id))
            .filter(student::Column::IsActive.eq(true))
            .order_by_asc(student::Column::Name)
            .all(&self.db)
            .await?;
        Ok(students)
    }

    pub async fn find_all_in_class(&self, class_id: Uuid) -> Result<Vec<student::Model>> {
        let students = student::Entity::find()
            .filter(student::Column::ClassId.eq(class_id))
            .all(&self.db)
            .await?;
        Ok(students)
    }

    pub async fn find_by_ids(&self, student_ids: &[Uuid]) -> Result<Vec<student::Model>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }
        let students = student::Entity::find()
            .filter(student::Column::StudentId.is_in(student_ids.iter().copied()))
            .all(&self.db)
            .await?;
        Ok(students)
    }

    pub async fn create(
        &self,
        student_id: Uuid,
        name: String,
        adm_no: String,
        email: Option<String>,
        class_id: Option<Uuid>,
        created_by: Uuid,
    ) -> Result<student::Model> {
        let now = chrono::Utc::now().naive_utc();
        let student_model = student::ActiveModel {
            student_id: Set(student_id),
            name: Set(name),
            adm_no: Set(adm_no),
            email: Set(email),
            class_id: Set(class_id),
            created_by: Set(created_by),
            is_active: Set(true),
            create_at: Set(now),
            update_at: Set(now),
        };
        let student = student_model.insert(&self.db).await?;
        Ok(student)
    }

    pub async fn update(
        &self,
        student_id: Uuid,
        update: StudentUpdate,
    ) -> Result<Option<student::Model>> {
        let Some(student) = self.find_by_id(student_id).await? else {
            return Ok(None);
        };

        let mut model = student.into_active_model();
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(class_id) = update.class_id {
            model.class_id = Set(class_id);
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }
        model.update_at = Set(chrono::Utc::now().naive_utc());

        let updated = model.update(&self.db).await?;
        Ok(Some(updated))
    }

    pub async fn assign_class(&self, student_id: Uuid, class_id: Uuid) -> Result<Option<student::Model>> {
        self.update(
            student_id,
            StudentUpdate {
                class_id: Some(Some(class_id)),
                ..Default::default()
            },
        )
        .await
    }

    /// Hard delete. Credentials, parent links and grades go with the row
    /// through the FK cascades set up in the migrations.
    pub async fn delete(&self, student_id: Uuid) -> Result<bool> {
        let result = student::Entity::delete_by_id(student_id)
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
