use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::class;
use crate::routes::students::dto::StudentResponse;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateClassRequest {
    #[schema(example = "Grade 8 Blue")]
    pub name: String,

    #[schema(example = "2026")]
    pub academic_year: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub academic_year: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AssignStudentRequest {
    pub student_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassResponse {
    pub class_id: Uuid,
    pub name: String,
    pub teacher_id: Uuid,
    pub academic_year: String,
    pub created_at: chrono::NaiveDateTime,
}

impl From<class::Model> for ClassResponse {
    fn from(class: class::Model) -> Self {
        ClassResponse {
            class_id: class.class_id,
            name: class.name,
            teacher_id: class.teacher_id,
            academic_year: class.academic_year,
            created_at: class.create_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassListResponse {
    pub total: usize,
    pub classes: Vec<ClassResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssignStudentResponse {
    pub message: String,
    pub student: StudentResponse,
}
