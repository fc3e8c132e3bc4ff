use std::collections::HashSet;

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use uuid::Uuid;

use super::dto::{
    ChildDashboard, ParentDashboardResponse, StudentDashboardResponse, TeacherDashboardResponse,
};
use crate::access::{AccessResolver, Action, OwnershipStore, Scope, Target};
use crate::extractor::AuthPrincipal;
use crate::grading;
use crate::repositories::{GradeRepository, StudentRepository, SubjectRepository};
use crate::routes::grades::dto::GradeResponse;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/v1/dashboard/teacher", get(teacher_dashboard))
        .route("/api/v1/dashboard/student", get(student_dashboard))
        .route("/api/v1/dashboard/parent", get(parent_dashboard))
}

/// Grading activity counters for the calling teacher.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/teacher",
    responses(
        (status = 200, description = "Teacher dashboard", body = TeacherDashboardResponse),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn teacher_dashboard(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<(StatusCode, Json<TeacherDashboardResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    let scope = resolver
        .authorize(&principal, Action::TeacherDashboard, Target::None)
        .await
        .map_err(|e| e.into_response())?;
    let teacher_id = scope.teacher_id().ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Unexpected scope for teacher action".to_string(),
        )
    })?;

    let grade_repo = GradeRepository::new(&state.db);
    let grades = grade_repo.find_by_recorder(teacher_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to fetch grades: {}", e),
        )
    })?;

    let students: HashSet<Uuid> = grades.iter().map(|g| g.student_id).collect();
    let subject_ids: Vec<Uuid> = grades
        .iter()
        .map(|g| g.subject_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let subject_repo = SubjectRepository::new(&state.db);
    let mut subjects_handled: Vec<String> = subject_repo
        .find_by_ids(&subject_ids)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch subjects: {}", e),
            )
        })?
        .into_iter()
        .map(|s| s.name)
        .collect();
    subjects_handled.sort();

    let response = TeacherDashboardResponse {
        total_graded: grades.len(),
        students_graded: students.len(),
        subjects_handled,
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Own grades and GPA for the calling student.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/student",
    responses(
        (status = 200, description = "Student dashboard", body = StudentDashboardResponse),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn student_dashboard(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<(StatusCode, Json<StudentDashboardResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    let scope = resolver
        .authorize(&principal, Action::StudentDashboard, Target::None)
        .await
        .map_err(|e| e.into_response())?;
    let Scope::SelfStudent(student_id) = scope else {
        return Err((
            StatusCode::FORBIDDEN,
            format!("Access forbidden for {} role", principal.role),
        ));
    };

    let grade_repo = GradeRepository::new(&state.db);
    let grades = grade_repo.find_by_student(student_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to fetch grades: {}", e),
        )
    })?;

    let percentages: Vec<f64> = grades.iter().map(|g| g.percentage).collect();
    let response = StudentDashboardResponse {
        gpa: grading::grade_point_average(&percentages),
        grades: grades.into_iter().map(GradeResponse::from).collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Per-child grades and GPA for the calling parent.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/parent",
    responses(
        (status = 200, description = "Parent dashboard", body = ParentDashboardResponse),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn parent_dashboard(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<(StatusCode, Json<ParentDashboardResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    let scope = resolver
        .authorize(&principal, Action::ParentDashboard, Target::None)
        .await
        .map_err(|e| e.into_response())?;
    let Scope::LinkedChildren(children) = scope else {
        return Err((
            StatusCode::FORBIDDEN,
            format!("Access forbidden for {} role", principal.role),
        ));
    };

    let student_repo = StudentRepository::new(&state.db);
    let grade_repo = GradeRepository::new(&state.db);
    let students = student_repo.find_by_ids(&children).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to fetch children: {}", e),
        )
    })?;

    let mut dashboards = Vec::with_capacity(students.len());
    for student in students {
        let grades = grade_repo
            .find_by_student(student.student_id)
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to fetch grades: {}", e),
                )
            })?;
        let percentages: Vec<f64> = grades.iter().map(|g| g.percentage).collect();
        dashboards.push(ChildDashboard {
            student_id: student.student_id,
            name: student.name,
            adm_no: student.adm_no,
            gpa: grading::grade_point_average(&percentages),
            grades: grades.into_iter().map(GradeResponse::from).collect(),
        });
    }

    Ok((
        StatusCode::OK,
        Json(ParentDashboardResponse {
            children: dashboards,
        }),
    ))
}
