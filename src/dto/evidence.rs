use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Evidence;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UploadEvidenceRequest {
    pub client_id: i32,
    pub file_url: String,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i32,
    pub description: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct EvidenceList {
    #[schema(value_type = Vec<Evidence>)]
    pub items: Vec<Evidence>,
}
