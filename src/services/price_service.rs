use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::{
    dto::prices::{AveragePrice, ComparisonList, PriceList, RegisterPriceRequest},
    entity::{
        competitors::{self, Column as CompetitorCol, Entity as Competitors},
        price_history::{ActiveModel as HistoryActive, ChangeType},
        prices::{self, ActiveModel as PriceActive, Column as PriceCol, Entity as Prices},
        products::{self, Column as ProductCol, Entity as Products},
    },
    error::{AppError, AppResult, all_or_empty},
    middleware::auth::AuthUser,
    models::{ComparisonCell, ComparisonRow, PriceWithDetails},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Accepts the decimal-string format used throughout the API: non-negative,
/// at most two fractional digits. Callers validate too; this guards the
/// service against anything that slipped past them.
pub fn parse_price_value(raw: &str) -> AppResult<Decimal> {
    let well_formed = match raw.split_once('.') {
        None => !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()),
        Some((int, frac)) => {
            !int.is_empty()
                && int.bytes().all(|b| b.is_ascii_digit())
                && (1..=2).contains(&frac.len())
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
    };
    if !well_formed {
        return Err(AppError::BadRequest(format!("Invalid price value: {raw}")));
    }
    Decimal::from_str(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Render a value with exactly two fractional digits, rounding midpoints
/// away from zero.
pub fn format_value(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum: Decimal = values.iter().copied().sum();
    Some(sum / Decimal::from(values.len() as i64))
}

pub async fn register_price(
    state: &AppState,
    user: &AuthUser,
    payload: RegisterPriceRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let value = parse_price_value(&payload.value)?;

    let product = Products::find_by_id(payload.product_id)
        .one(&state.orm)
        .await?;
    if product.is_none() {
        return Err(AppError::NotFound);
    }
    let competitor = Competitors::find_by_id(payload.competitor_id)
        .one(&state.orm)
        .await?;
    if competitor.is_none() {
        return Err(AppError::NotFound);
    }

    // One transaction for the pair of writes: a price row may never land
    // without its history entry.
    let txn = state.orm.begin().await?;

    let existing = Prices::find()
        .filter(
            Condition::all()
                .add(PriceCol::ProductId.eq(payload.product_id))
                .add(PriceCol::CompetitorId.eq(payload.competitor_id)),
        )
        .one(&txn)
        .await?;

    match existing {
        Some(current) => {
            // The history row captures the previous value before the price
            // row is overwritten.
            HistoryActive {
                id: NotSet,
                product_id: Set(payload.product_id),
                competitor_id: Set(payload.competitor_id),
                previous_value: Set(Some(current.value)),
                new_value: Set(Some(value)),
                changed_by: Set(user.user_id),
                change_type: Set(ChangeType::Updated),
                changed_at: NotSet,
            }
            .insert(&txn)
            .await?;

            let mut active: PriceActive = current.into();
            active.value = Set(value);
            active.registered_by = Set(user.user_id);
            active.updated_at = Set(Utc::now().into());
            active.update(&txn).await?;
        }
        None => {
            PriceActive {
                id: NotSet,
                product_id: Set(payload.product_id),
                competitor_id: Set(payload.competitor_id),
                value: Set(value),
                registered_by: Set(user.user_id),
                registered_at: NotSet,
                updated_at: NotSet,
            }
            .insert(&txn)
            .await?;

            HistoryActive {
                id: NotSet,
                product_id: Set(payload.product_id),
                competitor_id: Set(payload.competitor_id),
                previous_value: Set(None),
                new_value: Set(Some(value)),
                changed_by: Set(user.user_id),
                change_type: Set(ChangeType::Created),
                changed_at: NotSet,
            }
            .insert(&txn)
            .await?;
        }
    }

    txn.commit().await?;

    Ok(ApiResponse::ok("Price registered"))
}

pub async fn delete_price(
    state: &AppState,
    price_id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let price = Prices::find_by_id(price_id).one(&state.orm).await?;
    let price = match price {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let txn = state.orm.begin().await?;

    HistoryActive {
        id: NotSet,
        product_id: Set(price.product_id),
        competitor_id: Set(price.competitor_id),
        previous_value: Set(Some(price.value)),
        new_value: Set(None),
        changed_by: Set(price.registered_by),
        change_type: Set(ChangeType::Deleted),
        changed_at: NotSet,
    }
    .insert(&txn)
    .await?;

    Prices::delete_by_id(price.id).exec(&txn).await?;

    txn.commit().await?;

    Ok(ApiResponse::ok("Price removed"))
}

pub async fn list_all_prices(state: &AppState) -> AppResult<ApiResponse<PriceList>> {
    let prices = all_or_empty(
        Prices::find().all(&state.orm).await,
        "prices",
    )?;
    let products = all_or_empty(Products::find().all(&state.orm).await, "products")?;
    let competitors = all_or_empty(Competitors::find().all(&state.orm).await, "competitors")?;

    let mut items = project_prices(prices, &products, &competitors);
    items.sort_by(|a, b| {
        (a.product_name.as_str(), a.competitor_name.as_str())
            .cmp(&(b.product_name.as_str(), b.competitor_name.as_str()))
    });

    Ok(ApiResponse::success(
        "Prices",
        PriceList { items },
        Some(Meta::empty()),
    ))
}

pub async fn list_prices_by_product(
    state: &AppState,
    product_id: i32,
) -> AppResult<ApiResponse<PriceList>> {
    let prices = all_or_empty(
        Prices::find()
            .filter(PriceCol::ProductId.eq(product_id))
            .all(&state.orm)
            .await,
        "prices",
    )?;
    let products = all_or_empty(Products::find().all(&state.orm).await, "products")?;
    let competitors = all_or_empty(Competitors::find().all(&state.orm).await, "competitors")?;

    let mut items = project_prices(prices, &products, &competitors);
    items.sort_by(|a, b| a.competitor_name.cmp(&b.competitor_name));

    Ok(ApiResponse::success(
        "Prices",
        PriceList { items },
        Some(Meta::empty()),
    ))
}

/// The full matrix, recomputed from the store on every call. Prices change
/// independently of when the matrix is read, so nothing here is cached.
pub async fn comparison_rows(state: &AppState) -> AppResult<Vec<ComparisonRow>> {
    let products = all_or_empty(
        Products::find()
            .order_by_asc(ProductCol::Name)
            .all(&state.orm)
            .await,
        "products",
    )?;
    // Seed order doubles as the fixed display order of the four columns.
    let competitors = all_or_empty(
        Competitors::find()
            .order_by_asc(CompetitorCol::Id)
            .all(&state.orm)
            .await,
        "competitors",
    )?;
    let prices = all_or_empty(Prices::find().all(&state.orm).await, "prices")?;

    Ok(build_comparison(products, &competitors, &prices))
}

pub async fn get_comparison(state: &AppState) -> AppResult<ApiResponse<ComparisonList>> {
    let items = comparison_rows(state).await?;
    Ok(ApiResponse::success(
        "Price comparison",
        ComparisonList { items },
        Some(Meta::empty()),
    ))
}

pub async fn average_for_product(
    state: &AppState,
    product_id: i32,
) -> AppResult<ApiResponse<AveragePrice>> {
    let prices = all_or_empty(
        Prices::find()
            .filter(PriceCol::ProductId.eq(product_id))
            .all(&state.orm)
            .await,
        "prices",
    )?;
    let values: Vec<Decimal> = prices.iter().map(|p| p.value).collect();

    Ok(ApiResponse::success(
        "Average price",
        AveragePrice {
            product_id,
            average: mean(&values).map(format_value),
        },
        None,
    ))
}

/// Join products x competitors x current prices into comparison rows.
/// Product order is preserved; cells follow the competitor slice order.
pub fn build_comparison(
    products: Vec<products::Model>,
    competitors: &[competitors::Model],
    prices: &[prices::Model],
) -> Vec<ComparisonRow> {
    products
        .into_iter()
        .map(|product| {
            let current: Vec<&prices::Model> = prices
                .iter()
                .filter(|p| p.product_id == product.id)
                .collect();

            let mut values: Vec<Decimal> = Vec::new();
            let mut last_updated: Option<DateTime<Utc>> = None;

            let cells: Vec<ComparisonCell> = competitors
                .iter()
                .map(|competitor| {
                    let hit = current
                        .iter()
                        .find(|p| p.competitor_id == competitor.id)
                        .copied();
                    if let Some(price) = hit {
                        values.push(price.value);
                        let updated = price.updated_at.with_timezone(&Utc);
                        if last_updated.is_none_or(|t| updated > t) {
                            last_updated = Some(updated);
                        }
                    }
                    ComparisonCell {
                        competitor_id: competitor.id,
                        competitor_code: competitor.code.clone(),
                        competitor_name: competitor.name.clone(),
                        value: hit.map(|p| format_value(p.value)),
                        updated_at: hit.map(|p| p.updated_at.with_timezone(&Utc)),
                    }
                })
                .collect();

            ComparisonRow {
                product_id: product.id,
                product_name: product.name,
                category: product.category,
                prices: cells,
                average: mean(&values).map(format_value),
                last_updated,
            }
        })
        .collect()
}

fn project_prices(
    prices: Vec<prices::Model>,
    products: &[products::Model],
    competitors: &[competitors::Model],
) -> Vec<PriceWithDetails> {
    prices
        .into_iter()
        .filter_map(|price| {
            let product = products.iter().find(|p| p.id == price.product_id)?;
            let competitor = competitors.iter().find(|c| c.id == price.competitor_id)?;
            Some(PriceWithDetails {
                id: price.id,
                product_id: price.product_id,
                product_name: product.name.clone(),
                competitor_id: price.competitor_id,
                competitor_name: competitor.name.clone(),
                value: format_value(price.value),
                registered_by: price.registered_by,
                registered_at: price.registered_at.with_timezone(&Utc),
                updated_at: price.updated_at.with_timezone(&Utc),
            })
        })
        .collect()
}
