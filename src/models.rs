use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::price_history::ChangeType;

#[derive(Debug, Serialize, ToSchema, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Competitor {
    pub id: i32,
    pub name: String,
    pub code: String,
}

/// A current price joined with its product and competitor names.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PriceWithDetails {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub competitor_id: i32,
    pub competitor_name: String,
    pub value: String,
    pub registered_by: i32,
    pub registered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One cell of the comparison matrix: a competitor column for one product.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComparisonCell {
    pub competitor_id: i32,
    pub competitor_code: String,
    pub competitor_name: String,
    pub value: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One row of the comparison matrix, with cells in the fixed competitor order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComparisonRow {
    pub product_id: i32,
    pub product_name: String,
    pub category: Option<String>,
    pub prices: Vec<ComparisonCell>,
    /// Mean of the present values, rendered with two decimals. None when the
    /// product has no current price at all.
    pub average: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Immutable audit record of one price change, projected with display names.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub competitor_id: i32,
    pub competitor_name: String,
    pub previous_value: Option<String>,
    /// None for deletion events.
    pub new_value: Option<String>,
    pub changed_by: i32,
    pub change_type: ChangeType,
    pub changed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Client {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Sku {
    pub id: i32,
    pub client_id: i32,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Evidence {
    pub id: i32,
    pub client_id: i32,
    pub file_url: String,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i32,
    pub description: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}
