use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::{student, user};

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<user::Model>> {
        let user = user::Entity::find_by_id(user_id).one(&self.db).await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        let user = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(user)
    }

    /// Unified login lookup: the identifier is an email, or a student
    /// admission number resolving through the student profile.
    pub async fn find_by_identifier(&self, identifier: &str) -> Result<Option<user::Model>> {
        if let Some(user) = self.find_by_email(identifier).await? {
            return Ok(Some(user));
        }

        let Some(student) = student::Entity::find()
            .filter(student::Column::AdmNo.eq(identifier))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let user = user::Entity::find()
            .filter(user::Column::StudentId.eq(student.student_id))
            .one(&self.db)
            .await?;
        Ok(user)
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        email: String,
        password: String,
        role: RoleEnum,
        teacher_id: Option<Uuid>,
        student_id: Option<Uuid>,
        parent_id: Option<Uuid>,
    ) -> Result<user::Model> {
        let now = chrono::Utc::now().naive_utc();
        let user_model = user::ActiveModel {
            user_id: Set(user_id),
            email: Set(email),
            password: Set(password),
            role: Set(role),
            teacher_id: Set(teacher_id),
            student_id: Set(student_id),
            parent_id: Set(parent_id),
            create_at: Set(now),
            update_at: Set(now),
        };
        let user = user_model.insert(&self.db).await?;
        Ok(user)
    }
}
