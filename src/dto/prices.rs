use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{ComparisonRow, PriceWithDetails};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterPriceRequest {
    pub product_id: i32,
    pub competitor_id: i32,
    /// Decimal string, non-negative, at most two fractional digits.
    pub value: String,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct PriceList {
    #[schema(value_type = Vec<PriceWithDetails>)]
    pub items: Vec<PriceWithDetails>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ComparisonList {
    #[schema(value_type = Vec<ComparisonRow>)]
    pub items: Vec<ComparisonRow>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AveragePrice {
    pub product_id: i32,
    /// Two-decimal mean across competitors with a current price; None when
    /// the product has none.
    pub average: Option<String>,
}
