//! Bearer-token extractor producing the request [`Principal`].
//!
//! The token is verified, then the account is re-loaded so a deleted
//! account (e.g. after a student hard delete) is rejected even while its
//! token is still within its lifetime. Role and profile id are taken from
//! the stored account, not the claims.

use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use jsonwebtoken::errors::ErrorKind;
use uuid::Uuid;

use crate::access::{Principal, Role};
use crate::config::APP_CONFIG;
use crate::repositories::UserRepository;
use crate::state::AppState;
use crate::utils::jwt::JwtManager;

pub struct AuthPrincipal(pub Principal);

impl FromRequestParts<AppState> for AuthPrincipal {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| {
                (
                    StatusCode::UNAUTHORIZED,
                    "Authorization token required".to_string(),
                )
            })?;

        let jwt_manager = JwtManager::new(APP_CONFIG.jwt_secret.clone());
        let claims = jwt_manager.verify_jwt(bearer.token()).map_err(|err| {
            let message = match err.kind() {
                ErrorKind::ExpiredSignature => "Session expired, please login again",
                _ => "Invalid authentication token",
            };
            (StatusCode::UNAUTHORIZED, message.to_string())
        })?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                "Invalid authentication token".to_string(),
            )
        })?;

        let user_repo = UserRepository::new(&state.db);
        let user = user_repo
            .find_by_id(user_id)
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Database error: {}", e),
                )
            })?
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    "User account not found".to_string(),
                )
            })?;

        let role = Role::from(user.role);
        let profile_id = match role {
            Role::Teacher => user.teacher_id,
            Role::Student => user.student_id,
            Role::Parent => user.parent_id,
        }
        .ok_or_else(|| {
            (
                StatusCode::FORBIDDEN,
                "Profile reference missing for account".to_string(),
            )
        })?;

        Ok(AuthPrincipal(Principal {
            user_id,
            role,
            profile_id,
        }))
    }
}
