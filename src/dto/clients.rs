use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Client;

/// Lookup by code, creating the client only when absent. A second call with
/// the same code returns the original row untouched.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GetOrCreateClientRequest {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ClientList {
    #[schema(value_type = Vec<Client>)]
    pub items: Vec<Client>,
}
