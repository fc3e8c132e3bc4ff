use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use super::dto::{
    CreateStudentRequest, CreateStudentResponse, MessageResponse, StudentListResponse,
    StudentProfileResponse, StudentResponse, UpdateStudentRequest,
};
use crate::access::{AccessResolver, Action, OwnershipStore, Scope, Target};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::extractor::AuthPrincipal;
use crate::repositories::{
    GradeRepository, ParentRepository, StudentRepository, StudentUpdate, UserRepository,
};
use crate::routes::grades::dto::GradeResponse;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/v1/students", get(list_students).post(create_student))
        .route("/api/v1/students/me", get(my_profile))
        .route(
            "/api/v1/students/{student_id}",
            get(get_student).put(update_student).delete(delete_student),
        )
}

/// Registers a student under the calling teacher. Optionally creates and
/// links a parent, and provisions the student login with the admission
/// number as the initial password.
#[utoipa::path(
    post,
    path = "/api/v1/students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = CreateStudentResponse),
        (status = 400, description = "Admission number already in use"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Class not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn create_student(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<CreateStudentResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));

    let scope = resolver
        .authorize(&principal, Action::CreateStudent, Target::None)
        .await
        .map_err(|e| e.into_response())?;
    let teacher_id = scope.teacher_id().ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Unexpected scope for teacher action".to_string(),
        )
    })?;

    // Placing into a class is itself an ownership-gated action
    if let Some(class_id) = payload.class_id {
        resolver
            .authorize(
                &principal,
                Action::AssignStudentToClass,
                Target::Class(class_id),
            )
            .await
            .map_err(|e| e.into_response())?;
    }

    let student_repo = StudentRepository::new(&state.db);
    let existing = student_repo
        .find_by_adm_no(&payload.adm_no)
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
            "Student with this admission number already exists".to_string(),
        ));
    }

    let student = student_repo
        .create(
            Uuid::new_v4(),
            payload.name,
            payload.adm_no.clone(),
            payload.email,
            payload.class_id,
            teacher_id,
        )
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create student: {}", e),
            )
        })?;

    let parent_repo = ParentRepository::new(&state.db);
    let mut parent_id = None;
    if let Some(parent_info) = payload.parent {
        let parent = parent_repo
            .create(
                Uuid::new_v4(),
                parent_info.name,
                parent_info.email,
                parent_info.phone,
                teacher_id,
            )
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to create parent: {}", e),
                )
            })?;
        parent_repo
            .link_child(parent.parent_id, student.student_id)
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to link parent: {}", e),
                )
            })?;
        parent_id = Some(parent.parent_id);
    }

    // Student login: email falls back to a school alias on the admission
    // number, the admission number is the initial password.
    let account_email = student
        .email
        .clone()
        .unwrap_or_else(|| format!("{}@school.edu", student.adm_no));
    let hashed_password = bcrypt::hash(&payload.adm_no, bcrypt::DEFAULT_COST).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to hash password: {}", e),
        )
    })?;

    let user_repo = UserRepository::new(&state.db);
    user_repo
        .create(
            Uuid::new_v4(),
            account_email,
            hashed_password,
            RoleEnum::Student,
            None,
            Some(student.student_id),
            None,
        )
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create student account: {}", e),
            )
        })?;

    let response = CreateStudentResponse {
        message: "Student added successfully".to_string(),
        student: student.into(),
        parent_id,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Lists the caller's students. The resolver scope narrows the query to
/// `created_by = teacher` before it runs.
#[utoipa::path(
    get,
    path = "/api/v1/students",
    responses(
        (status = 200, description = "Students retrieved", body = StudentListResponse),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn list_students(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<(StatusCode, Json<StudentListResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    let scope = resolver
        .authorize(&principal, Action::ListStudents, Target::None)
        .await
        .map_err(|e| e.into_response())?;
    let teacher_id = scope.teacher_id().ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Unexpected scope for teacher action".to_string(),
        )
    })?;

    let student_repo = StudentRepository::new(&state.db);
    let students = student_repo
        .find_all_created_by(teacher_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch students: {}", e),
            )
        })?;

    let response = StudentListResponse {
        total: students.len(),
        students: students.into_iter().map(StudentResponse::from).collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Student's own profile with grades.
#[utoipa::path(
    get,
    path = "/api/v1/students/me",
    responses(
        (status = 200, description = "Own profile", body = StudentProfileResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Student profile not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn my_profile(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<(StatusCode, Json<StudentProfileResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    let scope = resolver
        .authorize(&principal, Action::ReadOwnProfile, Target::None)
        .await
        .map_err(|e| e.into_response())?;
    let Scope::SelfStudent(student_id) = scope else {
        return Err((
            StatusCode::FORBIDDEN,
            format!("Access forbidden for {} role", principal.role),
        ));
    };

    let student_repo = StudentRepository::new(&state.db);
    let student = student_repo
        .find_by_id(student_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            )
        })?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                "Student profile not found".to_string(),
            )
        })?;

    let grade_repo = GradeRepository::new(&state.db);
    let grades = grade_repo.find_by_student(student_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to fetch grades: {}", e),
        )
    })?;

    let response = StudentProfileResponse {
        student: student.into(),
        grades: grades.into_iter().map(GradeResponse::from).collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Single student, ownership-gated.
#[utoipa::path(
    get,
    path = "/api/v1/students/{student_id}",
    params(
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student retrieved", body = StudentResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn get_student(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(student_id): Path<Uuid>,
) -> Result<(StatusCode, Json<StudentResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    resolver
        .authorize(&principal, Action::ReadStudent, Target::Student(student_id))
        .await
        .map_err(|e| e.into_response())?;

    let student_repo = StudentRepository::new(&state.db);
    let student = student_repo
        .find_by_id(student_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Student not found".to_string()))?;

    Ok((StatusCode::OK, Json(student.into())))
}

/// Updates a student. Ownership can never be reassigned here; a class
/// change goes through the same ownership check as assignment.
#[utoipa::path(
    put,
    path = "/api/v1/students/{student_id}",
    params(
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn update_student(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(student_id): Path<Uuid>,
    Json(payload): Json<UpdateStudentRequest>,
) -> Result<(StatusCode, Json<StudentResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    resolver
        .authorize(
            &principal,
            Action::UpdateStudent,
            Target::Student(student_id),
        )
        .await
        .map_err(|e| e.into_response())?;

    if let Some(Some(class_id)) = payload.class_id {
        resolver
            .authorize(
                &principal,
                Action::AssignStudentToClass,
                Target::Class(class_id),
            )
            .await
            .map_err(|e| e.into_response())?;
    }

    let student_repo = StudentRepository::new(&state.db);
    let updated = student_repo
        .update(
            student_id,
            StudentUpdate {
                name: payload.name,
                email: payload.email,
                class_id: payload.class_id,
                is_active: payload.is_active,
            },
        )
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to update student: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Student not found".to_string()))?;

    Ok((StatusCode::OK, Json(updated.into())))
}

/// Hard delete: removes the student, their credentials, parent links and
/// grades (storage cascades).
#[utoipa::path(
    delete,
    path = "/api/v1/students/{student_id}",
    params(
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student deleted", body = MessageResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn delete_student(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(student_id): Path<Uuid>,
) -> Result<(StatusCode, Json<MessageResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    resolver
        .authorize(
            &principal,
            Action::DeleteStudent,
            Target::Student(student_id),
        )
        .await
        .map_err(|e| e.into_response())?;

    let student_repo = StudentRepository::new(&state.db);
    let deleted = student_repo.delete(student_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to delete student: {}", e),
        )
    })?;
    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Student not found".to_string()));
    }

    let response = MessageResponse {
        message: "Student deleted successfully".to_string(),
    };

    Ok((StatusCode::OK, Json(response)))
}
