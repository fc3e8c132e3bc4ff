use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::RoleEnum;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterTeacherRequest {
    #[schema(example = "Jane Mwangi")]
    pub name: String,

    #[schema(example = "jane.mwangi@school.edu")]
    pub email: String,

    #[schema(example = "password123")]
    pub password: String,

    #[schema(example = "0712345678")]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterTeacherResponse {
    pub message: String,
    pub teacher_id: Uuid,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    /// Email address, or a student admission number.
    #[schema(example = "jane.mwangi@school.edu")]
    pub identifier: String,

    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user_id: Uuid,
    pub role: RoleEnum,
    pub profile_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub user_id: Uuid,
    pub email: String,
    pub role: RoleEnum,
    pub profile_id: Uuid,
}
