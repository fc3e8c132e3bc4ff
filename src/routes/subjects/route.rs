use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use super::dto::{
    CreateSubjectRequest, SubjectListResponse, SubjectResponse, UpdateSubjectRequest,
};
use crate::access::{AccessResolver, Action, OwnershipStore, Target};
use crate::extractor::AuthPrincipal;
use crate::repositories::SubjectRepository;
use crate::routes::students::dto::MessageResponse;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/v1/subjects", post(create_subject))
        .route("/api/v1/subjects", get(list_subjects))
        .route("/api/v1/subjects/{subject_id}", put(update_subject))
        .route("/api/v1/subjects/{subject_id}", delete(delete_subject))
}

/// Adds a subject to the catalogue.
#[utoipa::path(
    post,
    path = "/api/v1/subjects",
    request_body = CreateSubjectRequest,
    responses(
        (status = 201, description = "Subject created", body = SubjectResponse),
        (status = 400, description = "Subject already exists"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
pub async fn create_subject(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(payload): Json<CreateSubjectRequest>,
) -> Result<(StatusCode, Json<SubjectResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    resolver
        .authorize(&principal, Action::CreateSubject, Target::None)
        .await
        .map_err(|e| e.into_response())?;

    let subject_repo = SubjectRepository::new(&state.db);
    let existing = subject_repo.find_by_name(&payload.name).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Database error: {}", e),
        )
    })?;
    if existing.is_some() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Subject already exists".to_string(),
        ));
    }

    let subject = subject_repo
        .create(Uuid::new_v4(), payload.name)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create subject: {}", e),
            )
        })?;

    Ok((StatusCode::CREATED, Json(subject.into())))
}

/// All subjects, alphabetical.
#[utoipa::path(
    get,
    path = "/api/v1/subjects",
    responses(
        (status = 200, description = "Subjects retrieved", body = SubjectListResponse),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
pub async fn list_subjects(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<(StatusCode, Json<SubjectListResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    resolver
        .authorize(&principal, Action::ListSubjects, Target::None)
        .await
        .map_err(|e| e.into_response())?;

    let subject_repo = SubjectRepository::new(&state.db);
    let subjects = subject_repo.find_all().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to fetch subjects: {}", e),
        )
    })?;

    let response = SubjectListResponse {
        total: subjects.len(),
        subjects: subjects.into_iter().map(SubjectResponse::from).collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Renames a subject.
#[utoipa::path(
    put,
    path = "/api/v1/subjects/{subject_id}",
    params(
        ("subject_id" = Uuid, Path, description = "Subject ID")
    ),
    request_body = UpdateSubjectRequest,
    responses(
        (status = 200, description = "Subject updated", body = SubjectResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Subject not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
pub async fn update_subject(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(subject_id): Path<Uuid>,
    Json(payload): Json<UpdateSubjectRequest>,
) -> Result<(StatusCode, Json<SubjectResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    resolver
        .authorize(&principal, Action::UpdateSubject, Target::None)
        .await
        .map_err(|e| e.into_response())?;

    let subject_repo = SubjectRepository::new(&state.db);
    let updated = subject_repo
        .rename(subject_id, payload.name)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to update subject: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Subject not found".to_string()))?;

    Ok((StatusCode::OK, Json(updated.into())))
}

/// Removes a subject and its recorded grades (storage cascade).
#[utoipa::path(
    delete,
    path = "/api/v1/subjects/{subject_id}",
    params(
        ("subject_id" = Uuid, Path, description = "Subject ID")
    ),
    responses(
        (status = 200, description = "Subject deleted", body = MessageResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Subject not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
pub async fn delete_subject(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(subject_id): Path<Uuid>,
) -> Result<(StatusCode, Json<MessageResponse>), (StatusCode, String)> {
    let resolver = AccessResolver::new(OwnershipStore::new(&state.db));
    resolver
        .authorize(&principal, Action::DeleteSubject, Target::None)
        .await
        .map_err(|e| e.into_response())?;

    let subject_repo = SubjectRepository::new(&state.db);
    let deleted = subject_repo.delete(subject_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to delete subject: {}", e),
        )
    })?;
    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Subject not found".to_string()));
    }

    let response = MessageResponse {
        message: "Subject deleted".to_string(),
    };

    Ok((StatusCode::OK, Json(response)))
}
