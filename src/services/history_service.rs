use std::collections::HashMap;

use chrono::{Duration, Utc};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    dto::history::HistoryList,
    entity::{
        competitors::{self, Entity as Competitors},
        price_history::{self, Column as HistoryCol, Entity as PriceHistory},
        products::{self, Entity as Products},
    },
    error::{AppResult, all_or_empty},
    models::HistoryEntry,
    response::{ApiResponse, Meta},
    routes::params::HistoryQuery,
    services::price_service::format_value,
    state::AppState,
};

/// Filters are conjunctive and all optional; no filters means the complete
/// audit trail, newest first.
pub async fn history_entries(
    state: &AppState,
    query: &HistoryQuery,
) -> AppResult<Vec<HistoryEntry>> {
    let mut condition = Condition::all();
    if let Some(product_id) = query.product_id {
        condition = condition.add(HistoryCol::ProductId.eq(product_id));
    }
    if let Some(competitor_id) = query.competitor_id {
        condition = condition.add(HistoryCol::CompetitorId.eq(competitor_id));
    }
    if let Some(days) = query.days {
        let cutoff = Utc::now() - Duration::days(days);
        condition = condition.add(HistoryCol::ChangedAt.gte(cutoff));
    }

    let rows = all_or_empty(
        PriceHistory::find()
            .filter(condition)
            .order_by_desc(HistoryCol::ChangedAt)
            .all(&state.orm)
            .await,
        "price history",
    )?;
    let products = all_or_empty(Products::find().all(&state.orm).await, "products")?;
    let competitors = all_or_empty(Competitors::find().all(&state.orm).await, "competitors")?;

    Ok(project_history(rows, &products, &competitors))
}

pub async fn list_history(
    state: &AppState,
    query: HistoryQuery,
) -> AppResult<ApiResponse<HistoryList>> {
    let items = history_entries(state, &query).await?;
    Ok(ApiResponse::success(
        "Price history",
        HistoryList { items },
        Some(Meta::empty()),
    ))
}

/// Attach display names to raw audit rows. History has no foreign keys, so a
/// row may refer to a product that no longer exists; those keep a placeholder
/// name instead of disappearing from the trail.
pub fn project_history(
    rows: Vec<price_history::Model>,
    products: &[products::Model],
    competitors: &[competitors::Model],
) -> Vec<HistoryEntry> {
    let product_names: HashMap<i32, &str> =
        products.iter().map(|p| (p.id, p.name.as_str())).collect();
    let competitor_names: HashMap<i32, &str> =
        competitors.iter().map(|c| (c.id, c.name.as_str())).collect();

    rows.into_iter()
        .map(|row| HistoryEntry {
            id: row.id,
            product_id: row.product_id,
            product_name: product_names
                .get(&row.product_id)
                .map(|name| (*name).to_string())
                .unwrap_or_else(|| "produto removido".to_string()),
            competitor_id: row.competitor_id,
            competitor_name: competitor_names
                .get(&row.competitor_id)
                .map(|name| (*name).to_string())
                .unwrap_or_else(|| "concorrente removido".to_string()),
            previous_value: row.previous_value.map(format_value),
            new_value: row.new_value.map(format_value),
            changed_by: row.changed_by,
            change_type: row.change_type,
            changed_at: row.changed_at.with_timezone(&Utc),
        })
        .collect()
}
