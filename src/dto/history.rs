use serde::Serialize;
use utoipa::ToSchema;

use crate::models::HistoryEntry;

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct HistoryList {
    #[schema(value_type = Vec<HistoryEntry>)]
    pub items: Vec<HistoryEntry>,
}
