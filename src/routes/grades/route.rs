use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use super::dto::{
    ClassAveragesResponse, CorrectGradeRequest, GradeListResponse, GradeResponse,
    RecordGradeRequest, SubjectAverage,
};
use crate::access::{AccessResolver, Action, OwnershipStore, Target};
use crate::entities::sea_orm_active_enums::ExamTypeEnum;
use crate::extractor::AuthPrincipal;
use crate::grading::{self, DEFAULT_MAX_SCORE};
use crate::repositories::{GradeRepository, NewGrade, StudentRepository, SubjectRepository};
use crate::routes::students::dto::MessageResponse;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/v1/grades", post(record_grade))
        .route("/api/v1/grades/student/{student_id}", get(student_grades))
        .route(
            "/api/v1/grades/{grade_id}",
            axum::routing::put(correct_grade).delete(delete_grade),
        )
        .route(
            "/api/v1/grades/class/{class_id}/averages",
            get(class_averages),
        )
}

/// Records a grade for an owned student. Derived percentage/letter are
/// computed here, immediately before the write, and stored with the score.
#[utoipa::path(
    post,
    path = "/api/v1/grades",
    request_body = RecordGradeRequest,
    responses(
        (status = 201, description = "Grade recorded", body = GradeResponse),
        (status = 400, description = "Invalid grade input or duplicate for student/subject/term"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Student or subject not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
pub async fn record_grade(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(payload): Json<RecordGradeRequest>,
) -> Result<(StatusCode, Json<GradeResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    let scope = resolver
        .authorize(
            &principal,
            Action::RecordGrade,
            Target::Student(payload.student_id),
        )
        .await
        .map_err(|e| e.into_response())?;
    let teacher_id = scope.teacher_id().ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Unexpected scope for teacher action".to_string(),
        )
    })?;

    let subject_repo = SubjectRepository::new(&state.db);
    let subject = subject_repo
        .find_by_id(payload.subject_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            )
        })?;
    if subject.is_none() {
        return Err((StatusCode::NOT_FOUND, "Subject not found".to_string()));
    }

    let grade_repo = GradeRepository::new(&state.db);
    let existing = grade_repo
        .find_by_student_subject_term(payload.student_id, payload.subject_id, payload.term)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            )
        })?;
    if existing.is_some() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Grade already exists for this subject and term".to_string(),
        ));
    }

    let max_score = payload.max_score.unwrap_or(DEFAULT_MAX_SCORE);
    let evaluation = grading::evaluate(payload.score, max_score)
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid grade input: {}", e)))?;

    // The grade inherits the student's current class for later reporting
    let student_repo = StudentRepository::new(&state.db);
    let class_id = student_repo
        .find_by_id(payload.student_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            )
        })?
        .and_then(|student| student.class_id);

    let grade = grade_repo
        .create(NewGrade {
            grade_id: Uuid::new_v4(),
            student_id: payload.student_id,
            subject_id: payload.subject_id,
            class_id,
            teacher_id,
            score: payload.score,
            max_score,
            evaluation,
            exam_type: payload.exam_type.unwrap_or(ExamTypeEnum::Quiz),
            term: payload.term,
        })
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to record grade: {}", e),
            )
        })?;

    Ok((StatusCode::CREATED, Json(grade.into())))
}

/// Grades for one student. Teachers see owned students, parents linked
/// children, students themselves; everything else is denied by the
/// resolver.
#[utoipa::path(
    get,
    path = "/api/v1/grades/student/{student_id}",
    params(
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Grades retrieved", body = GradeListResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
pub async fn student_grades(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(student_id): Path<Uuid>,
) -> Result<(StatusCode, Json<GradeListResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    resolver
        .authorize(
            &principal,
            Action::ReadStudentGrades,
            Target::Student(student_id),
        )
        .await
        .map_err(|e| e.into_response())?;

    let grade_repo = GradeRepository::new(&state.db);
    let grades = grade_repo.find_by_student(student_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to fetch grades: {}", e),
        )
    })?;

    let response = GradeListResponse {
        total: grades.len(),
        grades: grades.into_iter().map(GradeResponse::from).collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Score correction. Identity fields are immutable; the derived fields are
/// recomputed from the corrected score before the update is persisted.
#[utoipa::path(
    put,
    path = "/api/v1/grades/{grade_id}",
    params(
        ("grade_id" = Uuid, Path, description = "Grade ID")
    ),
    request_body = CorrectGradeRequest,
    responses(
        (status = 200, description = "Grade corrected", body = GradeResponse),
        (status = 400, description = "Invalid grade input"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Grade not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
pub async fn correct_grade(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(grade_id): Path<Uuid>,
    Json(payload): Json<CorrectGradeRequest>,
) -> Result<(StatusCode, Json<GradeResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    resolver
        .authorize(&principal, Action::CorrectGrade, Target::Grade(grade_id))
        .await
        .map_err(|e| e.into_response())?;

    let grade_repo = GradeRepository::new(&state.db);
    let grade = grade_repo
        .find_by_id(grade_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Grade not found".to_string()))?;

    let max_score = payload.max_score.unwrap_or(grade.max_score);
    let evaluation = grading::evaluate(payload.score, max_score)
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid grade input: {}", e)))?;

    let updated = grade_repo
        .update_score(grade_id, payload.score, max_score, evaluation)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to correct grade: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Grade not found".to_string()))?;

    Ok((StatusCode::OK, Json(updated.into())))
}

/// Deletes a grade, explicit teacher action only.
#[utoipa::path(
    delete,
    path = "/api/v1/grades/{grade_id}",
    params(
        ("grade_id" = Uuid, Path, description = "Grade ID")
    ),
    responses(
        (status = 200, description = "Grade deleted", body = MessageResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Grade not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
pub async fn delete_grade(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(grade_id): Path<Uuid>,
) -> Result<(StatusCode, Json<MessageResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    resolver
        .authorize(&principal, Action::DeleteGrade, Target::Grade(grade_id))
        .await
        .map_err(|e| e.into_response())?;

    let grade_repo = GradeRepository::new(&state.db);
    let deleted = grade_repo.delete(grade_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to delete grade: {}", e),
        )
    })?;
    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Grade not found".to_string()));
    }

    let response = MessageResponse {
        message: "Grade deleted".to_string(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Per-subject average percentage across an owned class.
#[utoipa::path(
    get,
    path = "/api/v1/grades/class/{class_id}/averages",
    params(
        ("class_id" = Uuid, Path, description = "Class ID")
    ),
    responses(
        (status = 200, description = "Averages computed", body = ClassAveragesResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Class not found or empty"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
pub async fn class_averages(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(class_id): Path<Uuid>,
) -> Result<(StatusCode, Json<ClassAveragesResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    resolver
        .authorize(&principal, Action::ClassAverages, Target::Class(class_id))
        .await
        .map_err(|e| e.into_response())?;

    let student_repo = StudentRepository::new(&state.db);
    let students = student_repo.find_all_in_class(class_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to fetch students: {}", e),
        )
    })?;
    if students.is_empty() {
        return Err((
            StatusCode::NOT_FOUND,
            "No students found in this class".to_string(),
        ));
    }

    let student_ids: Vec<Uuid> = students.iter().map(|s| s.student_id).collect();
    let grade_repo = GradeRepository::new(&state.db);
    let grades = grade_repo
        .find_by_students(&student_ids)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch grades: {}", e),
            )
        })?;

    let mut per_subject: HashMap<Uuid, (f64, usize)> = HashMap::new();
    for grade in &grades {
        let entry = per_subject.entry(grade.subject_id).or_insert((0.0, 0));
        entry.0 += grade.percentage;
        entry.1 += 1;
    }

    let subject_ids: Vec<Uuid> = per_subject.keys().copied().collect();
    let subject_repo = SubjectRepository::new(&state.db);
    let subjects = subject_repo.find_by_ids(&subject_ids).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to fetch subjects: {}", e),
        )
    })?;
    let subject_names: HashMap<Uuid, String> = subjects
        .into_iter()
        .map(|s| (s.subject_id, s.name))
        .collect();

    let mut averages: Vec<SubjectAverage> = per_subject
        .into_iter()
        .map(|(subject_id, (sum, count))| SubjectAverage {
            subject_id,
            subject_name: subject_names
                .get(&subject_id)
                .cloned()
                .unwrap_or_default(),
            average_percentage: (sum / count as f64 * 100.0).round() / 100.0,
            grade_count: count,
        })
        .collect();
    averages.sort_by(|a, b| a.subject_name.cmp(&b.subject_name));

    let response = ClassAveragesResponse { class_id, averages };

    Ok((StatusCode::OK, Json(response)))
}
