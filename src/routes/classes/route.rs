use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use uuid::Uuid;

use super::dto::{
    AssignStudentRequest, AssignStudentResponse, ClassListResponse, ClassResponse,
    CreateClassRequest, UpdateClassRequest,
};
use crate::access::{AccessResolver, Action, OwnershipStore, Target};
use crate::extractor::AuthPrincipal;
use crate::repositories::{ClassRepository, ClassUpdate, StudentRepository};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/v1/classes", get(list_classes).post(create_class))
        .route("/api/v1/classes/{class_id}", put(update_class))
        .route("/api/v1/classes/{class_id}/students", post(assign_student))
}

/// Creates a class owned by the calling teacher.
#[utoipa::path(
    post,
    path = "/api/v1/classes",
    request_body = CreateClassRequest,
    responses(
        (status = 201, description = "Class created", body = ClassResponse),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
pub async fn create_class(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(payload): Json<CreateClassRequest>,
) -> Result<(StatusCode, Json<ClassResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    let scope = resolver
        .authorize(&principal, Action::CreateClass, Target::None)
        .await
        .map_err(|e| e.into_response())?;
    let teacher_id = scope.teacher_id().ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Unexpected scope for teacher action".to_string(),
        )
    })?;

    let class_repo = ClassRepository::new(&state.db);
    let class = class_repo
        .create(
            Uuid::new_v4(),
            payload.name,
            teacher_id,
            payload.academic_year,
        )
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create class: {}", e),
            )
        })?;

    Ok((StatusCode::CREATED, Json(class.into())))
}

/// Lists the caller's classes.
#[utoipa::path(
    get,
    path = "/api/v1/classes",
    responses(
        (status = 200, description = "Classes retrieved", body = ClassListResponse),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
pub async fn list_classes(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<(StatusCode, Json<ClassListResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    let scope = resolver
        .authorize(&principal, Action::ListClasses, Target::None)
        .await
        .map_err(|e| e.into_response())?;
    let teacher_id = scope.teacher_id().ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Unexpected scope for teacher action".to_string(),
        )
    })?;

    let class_repo = ClassRepository::new(&state.db);
    let classes = class_repo.find_all_owned_by(teacher_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to fetch classes: {}", e),
        )
    })?;

    let response = ClassListResponse {
        total: classes.len(),
        classes: classes.into_iter().map(ClassResponse::from).collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Renames or re-years an owned class.
#[utoipa::path(
    put,
    path = "/api/v1/classes/{class_id}",
    params(
        ("class_id" = Uuid, Path, description = "Class ID")
    ),
    request_body = UpdateClassRequest,
    responses(
        (status = 200, description = "Class updated", body = ClassResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Class not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
pub async fn update_class(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(class_id): Path<Uuid>,
    Json(payload): Json<UpdateClassRequest>,
) -> Result<(StatusCode, Json<ClassResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    resolver
        .authorize(&principal, Action::UpdateClass, Target::Class(class_id))
        .await
        .map_err(|e| e.into_response())?;

    let class_repo = ClassRepository::new(&state.db);
    let updated = class_repo
        .update(
            class_id,
            ClassUpdate {
                name: payload.name,
                academic_year: payload.academic_year,
            },
        )
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to update class: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Class not found".to_string()))?;

    Ok((StatusCode::OK, Json(updated.into())))
}

/// Places a student into a class roster. Both the class and the student
/// must belong to the calling teacher.
#[utoipa::path(
    post,
    path = "/api/v1/classes/{class_id}/students",
    params(
        ("class_id" = Uuid, Path, description = "Class ID")
    ),
    request_body = AssignStudentRequest,
    responses(
        (status = 200, description = "Student assigned", body = AssignStudentResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Class or student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
pub async fn assign_student(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(class_id): Path<Uuid>,
    Json(payload): Json<AssignStudentRequest>,
) -> Result<(StatusCode, Json<AssignStudentResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    resolver
        .authorize(
            &principal,
            Action::AssignStudentToClass,
            Target::Class(class_id),
        )
        .await
        .map_err(|e| e.into_response())?;
    resolver
        .authorize(
            &principal,
            Action::AssignStudentToClass,
            Target::Student(payload.student_id),
        )
        .await
        .map_err(|e| e.into_response())?;

    let student_repo = StudentRepository::new(&state.db);
    let student = student_repo
        .assign_class(payload.student_id, class_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to assign student: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Student not found".to_string()))?;

    let response = AssignStudentResponse {
        message: "Student added to class".to_string(),
        student: student.into(),
    };

    Ok((StatusCode::OK, Json(response)))
}
