use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use super::dto::{
    LoginRequest, LoginResponse, MeResponse, RegisterTeacherRequest, RegisterTeacherResponse,
};
use crate::access::Role;
use crate::config::{APP_CONFIG, JWT_TTL_SECONDS};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::extractor::AuthPrincipal;
use crate::repositories::{TeacherRepository, UserRepository};
use crate::state::AppState;
use crate::utils::jwt::JwtManager;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/v1/auth/register-teacher", post(register_teacher))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/me", get(me))
}

/// Open teacher registration: creates the teacher profile plus its login
/// account in one step.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register-teacher",
    request_body = RegisterTeacherRequest,
    responses(
        (status = 201, description = "Teacher registered", body = RegisterTeacherResponse),
        (status = 400, description = "Email already registered"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn register_teacher(
    State(state): State<AppState>,
    Json(payload): Json<RegisterTeacherRequest>,
) -> Result<(StatusCode, Json<RegisterTeacherResponse>), (StatusCode, String)> {
    let user_repo = UserRepository::new(&state.db);
    let teacher_repo = TeacherRepository::new(&state.db);

    let existing = user_repo.find_by_email(&payload.email).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Database error: {}", e),
        )
    })?;
    if existing.is_some() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Email already registered".to_string(),
        ));
    }

    let teacher = teacher_repo
        .create(
            Uuid::new_v4(),
            payload.name,
            payload.email.clone(),
            payload.phone,
        )
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create teacher: {}", e),
            )
        })?;

    let hashed_password = bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to hash password: {}", e),
        )
    })?;

    user_repo
        .create(
            Uuid::new_v4(),
            payload.email,
            hashed_password,
            RoleEnum::Teacher,
            Some(teacher.teacher_id),
            None,
            None,
        )
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create user account: {}", e),
            )
        })?;

    let response = RegisterTeacherResponse {
        message: "Teacher registered successfully".to_string(),
        teacher_id: teacher.teacher_id,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Unified login: the identifier is an email address or a student
/// admission number. Returns a bearer token scoped to the account's role.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), (StatusCode, String)> {
    let user_repo = UserRepository::new(&state.db);

    let user = user_repo
        .find_by_identifier(&payload.identifier)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string()))?;

    let password_valid = bcrypt::verify(&payload.password, &user.password).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Password verification error: {}", e),
        )
    })?;
    if !password_valid {
        return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".to_string()));
    }

    let role = Role::from(user.role);
    let profile_id = match role {
        Role::Teacher => user.teacher_id,
        Role::Student => user.student_id,
        Role::Parent => user.parent_id,
    }
    .ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Profile reference missing for account".to_string(),
        )
    })?;

    let jwt_manager = JwtManager::new(APP_CONFIG.jwt_secret.clone());
    let token = jwt_manager
        .create_jwt(&user.user_id.to_string(), role, profile_id, JWT_TTL_SECONDS)
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create token: {}", e),
            )
        })?;

    let response = LoginResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: JWT_TTL_SECONDS,
        user_id: user.user_id,
        role: user.role,
        profile_id,
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Current account summary for the verified token.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current account", body = MeResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn me(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<(StatusCode, Json<MeResponse>), (StatusCode, String)> {
    let user_repo = UserRepository::new(&state.db);

    let user = user_repo
        .find_by_id(principal.user_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "User not found".to_string()))?;

    let response = MeResponse {
        user_id: user.user_id,
        email: user.email,
        role: user.role,
        profile_id: principal.profile_id,
    };

    Ok((StatusCode::OK, Json(response)))
}
