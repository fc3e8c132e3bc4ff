use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::parent;
use crate::routes::grades::dto::GradeResponse;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateParentRequest {
    #[schema(example = "Peter Otieno")]
    pub name: String,

    pub email: Option<String>,
    pub phone: Option<String>,

    /// Students to link; every one must be owned by the calling teacher.
    #[serde(default)]
    pub children: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ParentResponse {
    pub parent_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

impl From<parent::Model> for ParentResponse {
    fn from(parent: parent::Model) -> Self {
        ParentResponse {
            parent_id: parent.parent_id,
            name: parent.name,
            email: parent.email,
            phone: parent.phone,
            created_at: parent.create_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateParentResponse {
    pub message: String,
    pub parent: ParentResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ParentListResponse {
    pub total: usize,
    pub parents: Vec<ParentResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChildSummary {
    pub student_id: Uuid,
    pub name: String,
    pub adm_no: String,
    pub class_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ParentProfileResponse {
    pub parent_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub children: Vec<ChildSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChildProfile {
    pub student_id: Uuid,
    pub name: String,
    pub adm_no: String,
    pub class_id: Option<Uuid>,
    pub grades: Vec<GradeResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChildrenResponse {
    pub children: Vec<ChildProfile>,
}
