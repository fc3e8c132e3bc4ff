use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::student;
use crate::routes::grades::dto::GradeResponse;

/// Inline parent details accepted when registering a student, so the common
/// enrolment flow is a single call.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ParentInfo {
    #[schema(example = "Peter Otieno")]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateStudentRequest {
    #[schema(example = "Amina Yusuf")]
    pub name: String,

    /// Admission number, unique across the school. Doubles as the initial
    /// account password.
    #[schema(example = "ADM-2026-041")]
    pub adm_no: String,

    pub email: Option<String>,

    /// Class to place the student in; must be owned by the caller.
    pub class_id: Option<Uuid>,

    pub parent: Option<ParentInfo>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub email: Option<Option<String>>,
    pub class_id: Option<Option<Uuid>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentResponse {
    pub student_id: Uuid,
    pub name: String,
    pub adm_no: String,
    pub email: Option<String>,
    pub class_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: chrono::NaiveDateTime,
}

impl From<student::Model> for StudentResponse {
    fn from(student: student::Model) -> Self {
        StudentResponse {
            student_id: student.student_id,
            name: student.name,
            adm_no: student.adm_no,
            email: student.email,
            class_id: student.class_id,
            is_active: student.is_active,
            created_at: student.create_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateStudentResponse {
    pub message: String,
    pub student: StudentResponse,
    /// Parent created and linked inline, when one was supplied.
    pub parent_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentListResponse {
    pub total: usize,
    pub students: Vec<StudentResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentProfileResponse {
    pub student: StudentResponse,
    pub grades: Vec<GradeResponse>,
}
