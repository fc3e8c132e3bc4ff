use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::routes::grades::dto::GradeResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherDashboardResponse {
    /// Grades this teacher has recorded.
    pub total_graded: usize,
    /// Distinct students among those grades.
    pub students_graded: usize,
    pub subjects_handled: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentDashboardResponse {
    pub grades: Vec<GradeResponse>,
    /// 4.0-scale GPA over stored percentages.
    pub gpa: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChildDashboard {
    pub student_id: Uuid,
    pub name: String,
    pub adm_no: String,
    pub grades: Vec<GradeResponse>,
    pub gpa: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ParentDashboardResponse {
    pub children: Vec<ChildDashboard>,
}
