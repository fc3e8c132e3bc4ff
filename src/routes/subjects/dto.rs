use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::subject;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateSubjectRequest {
    #[schema(example = "Mathematics")]
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateSubjectRequest {
    #[schema(example = "Applied Mathematics")]
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectResponse {
    pub subject_id: Uuid,
    pub name: String,
    pub created_at: chrono::NaiveDateTime,
}

impl From<subject::Model> for SubjectResponse {
    fn from(subject: subject::Model) -> Self {
        SubjectResponse {
            subject_id: subject.subject_id,
            name: subject.name,
            created_at: subject.create_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectListResponse {
    pub total: usize,
    pub subjects: Vec<SubjectResponse>,
}
