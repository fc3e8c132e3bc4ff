use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::grade;
use crate::entities::sea_orm_active_enums::{ExamTypeEnum, TermEnum};

/// Grade creation payload. Percentage and letter are never accepted here;
/// they are recomputed server-side on every write.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RecordGradeRequest {
    pub student_id: Uuid,
    pub subject_id: Uuid,

    #[schema(example = 87.5)]
    pub score: f64,

    /// Defaults to 100 when omitted.
    pub max_score: Option<f64>,

    /// Defaults to quiz when omitted.
    pub exam_type: Option<ExamTypeEnum>,

    pub term: TermEnum,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CorrectGradeRequest {
    #[schema(example = 91.0)]
    pub score: f64,

    /// Keeps the recorded maximum when omitted.
    pub max_score: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GradeResponse {
    pub grade_id: Uuid,
    pub student_id: Uuid,
    pub subject_id: Uuid,
    pub class_id: Option<Uuid>,
    pub teacher_id: Uuid,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub letter: String,
    pub exam_type: ExamTypeEnum,
    pub term: TermEnum,
    pub recorded_at: chrono::NaiveDateTime,
}

impl From<grade::Model> for GradeResponse {
    fn from(grade: grade::Model) -> Self {
        GradeResponse {
            grade_id: grade.grade_id,
            student_id: grade.student_id,
            subject_id: grade.subject_id,
            class_id: grade.class_id,
            teacher_id: grade.teacher_id,
            score: grade.score,
            max_score: grade.max_score,
            percentage: grade.percentage,
            letter: grade.letter,
            exam_type: grade.exam_type,
            term: grade.term,
            recorded_at: grade.recorded_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GradeListResponse {
    pub total: usize,
    pub grades: Vec<GradeResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectAverage {
    pub subject_id: Uuid,
    pub subject_name: String,
    /// Mean stored percentage across the class, rounded to two decimals.
    pub average_percentage: f64,
    pub grade_count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassAveragesResponse {
    pub class_id: Uuid,
    pub averages: Vec<SubjectAverage>,
}
