use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::grade;
use crate::entities::sea_orm_active_enums::{ExamTypeEnum, TermEnum};
use crate::grading::Evaluation;

/// Insert payload for a grade row. The derived fields come in as an
/// [`Evaluation`] produced right before the call, so the stored
/// percentage/letter can never drift from score/max_score.
pub struct NewGrade {
    pub grade_id: Uuid,
    pub student_id: Uuid,
    pub subject_id: Uuid,
    pub class_id: Option<Uuid>,
    pub teacher_id: Uuid,
    pub score: f64,
    pub max_score: f64,
    pub evaluation: Evaluation,
    pub exam_type: ExamTypeEnum,
    pub term: TermEnum,
}

pub struct GradeRepository {
    db: DatabaseConnection,
}

impl GradeRepository {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub async fn find_by_id(&self, grade_id: Uuid) -> Result<Option<grade::Model>> {
        let grade = grade::Entity::find_by_id(grade_id).one(&self.db).await?;
        Ok(grade)
    }

    pub async fn find_by_student(&self, student_id: Uuid) -> Result<Vec<grade::Model>> {
        let grades = grade::Entity::find()
            .filter(grade::Column::StudentId.eq(student_id))
            .order_by_desc(grade::Column::RecordedAt)
            .all(&self.db)
            .await?;
        Ok(grades)
    }

    pub async fn find_by_students(&self, student_ids: &[Uuid]) -> Result<Vec<grade::Model>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }
        let grades = grade::Entity::find()
            .filter(grade::Column::StudentId.is_in(student_ids.iter().copied()))
            .order_by_desc(grade::Column::RecordedAt)
            .all(&self.db)
            .await?;
        Ok(grades)
    }

    /// Grades recorded by one teacher, for the dashboard counters.
    pub async fn find_by_recorder(&self, teacher_id: Uuid) -> Result<Vec<grade::Model>> {
        let grades = grade::Entity::find()
            .filter(grade::Column::TeacherId.eq(teacher_id))
            .all(&self.db)
            .await?;
        Ok(grades)
    }

    /// Uniqueness precheck for (student, subject, term). The unique index
    /// settles concurrent inserts; this keeps the common case a clean 400.
    pub async fn find_by_student_subject_term(
        &self,
        student_id: Uuid,
        subject_id: Uuid,
        term: TermEnum,
    ) -> Result<Option<grade::Model>> {
        let grade = grade::Entity::find()
            .filter(grade::Column::StudentId.eq(student_id))
            .filter(grade::Column::SubjectId.eq(subject_id))
            .filter(grade::Column::Term.eq(term))
            .one(&self.db)
            .await?;
        Ok(grade)
    }

    pub async fn create(&self, new_grade: NewGrade) -> Result<grade::Model> {
        let grade_model = grade::ActiveModel {
            grade_id: Set(new_grade.grade_id),
            student_id: Set(new_grade.student_id),
            subject_id: Set(new_grade.subject_id),
            class_id: Set(new_grade.class_id),
            teacher_id: Set(new_grade.teacher_id),
            score: Set(new_grade.score),
            max_score: Set(new_grade.max_score),
            percentage: Set(new_grade.evaluation.percentage),
            letter: Set(new_grade.evaluation.letter.as_str().to_string()),
            exam_type: Set(new_grade.exam_type),
            term: Set(new_grade.term),
            recorded_at: Set(chrono::Utc::now().naive_utc()),
        };
        let grade = grade_model.insert(&self.db).await?;
        Ok(grade)
    }

    /// Score correction. Identity fields stay as recorded; only the score
    /// and its derived fields change, together.
    pub async fn update_score(
        &self,
        grade_id: Uuid,
        score: f64,
        max_score: f64,
        evaluation: Evaluation,
    ) -> Result<Option<grade::Model>> {
        let Some(grade) = self.find_by_id(grade_id).await? else {
            return Ok(None);
        };

        let mut model = grade.into_active_model();
        model.score = Set(score);
        model.max_score = Set(max_score);
        model.percentage = Set(evaluation.percentage);
        model.letter = Set(evaluation.letter.as_str().to_string());

        let updated = model.update(&self.db).await?;
        Ok(Some(updated))
    }

    pub async fn delete(&self, grade_id: Uuid) -> Result<bool> {
        let result = grade::Entity::delete_by_id(grade_id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
