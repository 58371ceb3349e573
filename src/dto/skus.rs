use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Sku;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSkuRequest {
    pub client_id: i32,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub sort_order: i32,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct SkuList {
    #[schema(value_type = Vec<Sku>)]
    pub items: Vec<Sku>,
}
