use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use super::dto::{
    ChildProfile, ChildSummary, ChildrenResponse, CreateParentRequest, CreateParentResponse,
    ParentListResponse, ParentProfileResponse, ParentResponse,
};
use crate::access::{AccessResolver, Action, OwnershipStore, Scope, Target};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::extractor::AuthPrincipal;
use crate::repositories::{GradeRepository, ParentRepository, StudentRepository, UserRepository};
use crate::routes::grades::dto::GradeResponse;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/v1/parents", post(create_parent).get(list_parents))
        .route("/api/v1/parents/me", get(get_parent_profile))
        .route("/api/v1/parents/children", get(my_children))
        .route(
            "/api/v1/parents/children/{student_id}/grades",
            get(child_grades),
        )
}

/// Creates a parent, links the given children and provisions a login when
/// both email and phone are present (phone doubles as the initial
/// password).
#[utoipa::path(
    post,
    path = "/api/v1/parents",
    request_body = CreateParentRequest,
    responses(
        (status = 201, description = "Parent created", body = CreateParentResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Linked student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Parents"
)]
pub async fn create_parent(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(payload): Json<CreateParentRequest>,
) -> Result<(StatusCode, Json<CreateParentResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    let scope = resolver
        .authorize(&principal, Action::CreateParent, Target::None)
        .await
        .map_err(|e| e.into_response())?;
    let teacher_id = scope.teacher_id().ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Unexpected scope for teacher action".to_string(),
        )
    })?;

    // Each child link is ownership-gated like any other student access
    for child_id in &payload.children {
        resolver
            .authorize(&principal, Action::CreateParent, Target::Student(*child_id))
            .await
            .map_err(|e| e.into_response())?;
    }

    let parent_repo = ParentRepository::new(&state.db);
    let parent = parent_repo
        .create(
            Uuid::new_v4(),
            payload.name,
            payload.email.clone(),
            payload.phone.clone(),
            teacher_id,
        )
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create parent: {}", e),
            )
        })?;

    for child_id in &payload.children {
        parent_repo
            .link_child(parent.parent_id, *child_id)
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to link child: {}", e),
                )
            })?;
    }

    // Parent login uses the phone number as initial password
    if let (Some(email), Some(phone)) = (payload.email, payload.phone) {
        let hashed_password = bcrypt::hash(&phone, bcrypt::DEFAULT_COST).map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to hash password: {}", e),
            )
        })?;
        let user_repo = UserRepository::new(&state.db);
        user_repo
            .create(
                Uuid::new_v4(),
                email,
                hashed_password,
                RoleEnum::Parent,
                None,
                None,
                Some(parent.parent_id),
            )
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to create parent account: {}", e),
                )
            })?;
    }

    let response = CreateParentResponse {
        message: "Parent added and linked successfully".to_string(),
        parent: parent.into(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Lists parents created by the calling teacher.
#[utoipa::path(
    get,
    path = "/api/v1/parents",
    responses(
        (status = 200, description = "Parents retrieved", body = ParentListResponse),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Parents"
)]
pub async fn list_parents(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<(StatusCode, Json<ParentListResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    let scope = resolver
        .authorize(&principal, Action::ListParents, Target::None)
        .await
        .map_err(|e| e.into_response())?;
    let teacher_id = scope.teacher_id().ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Unexpected scope for teacher action".to_string(),
        )
    })?;

    let parent_repo = ParentRepository::new(&state.db);
    let parents = parent_repo
        .find_all_created_by(teacher_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch parents: {}", e),
            )
        })?;

    let response = ParentListResponse {
        total: parents.len(),
        parents: parents.into_iter().map(ParentResponse::from).collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Parent's own profile with linked child summaries.
#[utoipa::path(
    get,
    path = "/api/v1/parents/me",
    responses(
        (status = 200, description = "Own profile", body = ParentProfileResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Parent profile not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Parents"
)]
pub async fn get_parent_profile(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<(StatusCode, Json<ParentProfileResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    let scope = resolver
        .authorize(&principal, Action::ReadOwnProfile, Target::None)
        .await
        .map_err(|e| e.into_response())?;
    let Scope::LinkedChildren(children) = scope else {
        return Err((
            StatusCode::FORBIDDEN,
            format!("Access forbidden for {} role", principal.role),
        ));
    };

    let parent_repo = ParentRepository::new(&state.db);
    let parent = parent_repo
        .find_by_id(principal.profile_id)
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
                "Parent profile not found".to_string(),
            )
        })?;

    let student_repo = StudentRepository::new(&state.db);
    let students = student_repo.find_by_ids(&children).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to fetch children: {}", e),
        )
    })?;

    let response = ParentProfileResponse {
        parent_id: parent.parent_id,
        name: parent.name,
        email: parent.email,
        phone: parent.phone,
        children: students
            .into_iter()
            .map(|s| ChildSummary {
                student_id: s.student_id,
                name: s.name,
                adm_no: s.adm_no,
                class_id: s.class_id,
            })
            .collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Linked children with their grades.
#[utoipa::path(
    get,
    path = "/api/v1/parents/children",
    responses(
        (status = 200, description = "Children retrieved", body = ChildrenResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "No students linked to parent"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Parents"
)]
pub async fn my_children(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<(StatusCode, Json<ChildrenResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    let scope = resolver
        .authorize(&principal, Action::ReadLinkedChildren, Target::None)
        .await
        .map_err(|e| e.into_response())?;
    let Scope::LinkedChildren(children) = scope else {
        return Err((
            StatusCode::FORBIDDEN,
            format!("Access forbidden for {} role", principal.role),
        ));
    };
    if children.is_empty() {
        return Err((
            StatusCode::NOT_FOUND,
            "No students linked to parent".to_string(),
        ));
    }

    let student_repo = StudentRepository::new(&state.db);
    let grade_repo = GradeRepository::new(&state.db);
    let students = student_repo.find_by_ids(&children).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to fetch children: {}", e),
        )
    })?;

    let mut profiles = Vec::with_capacity(students.len());
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
        profiles.push(ChildProfile {
            student_id: student.student_id,
            name: student.name,
            adm_no: student.adm_no,
            class_id: student.class_id,
            grades: grades.into_iter().map(GradeResponse::from).collect(),
        });
    }

    Ok((StatusCode::OK, Json(ChildrenResponse { children: profiles })))
}

/// Grades for one linked child. Any other student id is denied by the
/// resolver's link gate.
#[utoipa::path(
    get,
    path = "/api/v1/parents/children/{student_id}/grades",
    params(
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Child grades retrieved", body = ChildProfile),
        (status = 403, description = "Not linked to this student"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Parents"
)]
pub async fn child_grades(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(student_id): Path<Uuid>,
) -> Result<(StatusCode, Json<ChildProfile>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    resolver
        .authorize(
            &principal,
            Action::ReadLinkedChildren,
            Target::Student(student_id),
        )
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

    let grade_repo = GradeRepository::new(&state.db);
    let grades = grade_repo.find_by_student(student_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to fetch grades: {}", e),
        )
    })?;

    let response = ChildProfile {
        student_id: student.student_id,
        name: student.name,
        adm_no: student.adm_no,
        class_id: student.class_id,
        grades: grades.into_iter().map(GradeResponse::from).collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}
