use axum::{
    Json, Router,
    extract::{Path, State},
};

use crate::{
    dto::prices::{AveragePrice, ComparisonList, PriceList, RegisterPriceRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::price_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::get(list_all_prices))
        .route("/", axum::routing::post(register_price))
        .route("/{id}", axum::routing::delete(delete_price))
        .route("/product/{product_id}", axum::routing::get(list_prices_by_product))
        .route("/comparison", axum::routing::get(get_comparison))
        .route("/average/{product_id}", axum::routing::get(get_average))
}

#[utoipa::path(
    get,
    path = "/api/prices",
    responses(
        (status = 200, description = "All current prices with product and competitor names", body = ApiResponse<PriceList>)
    ),
    tag = "Prices"
)]
pub async fn list_all_prices(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<PriceList>>> {
    let resp = price_service::list_all_prices(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/prices/product/{product_id}",
    params(
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Current prices for one product", body = ApiResponse<PriceList>)
    ),
    tag = "Prices"
)]
pub async fn list_prices_by_product(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> AppResult<Json<ApiResponse<PriceList>>> {
    let resp = price_service::list_prices_by_product(&state, product_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/prices",
    request_body = RegisterPriceRequest,
    responses(
        (status = 200, description = "Price registered"),
        (status = 400, description = "Malformed price value"),
        (status = 404, description = "Product or competitor not found"),
    ),
    tag = "Prices"
)]
pub async fn register_price(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<RegisterPriceRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = price_service::register_price(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/prices/{id}",
    params(
        ("id" = i32, Path, description = "Price ID")
    ),
    responses(
        (status = 200, description = "Price removed"),
        (status = 404, description = "Price not found"),
    ),
    tag = "Prices"
)]
pub async fn delete_price(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = price_service::delete_price(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/prices/comparison",
    responses(
        (status = 200, description = "Comparison matrix, one row per product ordered by name", body = ApiResponse<ComparisonList>)
    ),
    tag = "Prices"
)]
pub async fn get_comparison(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ComparisonList>>> {
    let resp = price_service::get_comparison(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/prices/average/{product_id}",
    params(
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Mean of the product's current prices", body = ApiResponse<AveragePrice>)
    ),
    tag = "Prices"
)]
pub async fn get_average(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> AppResult<Json<ApiResponse<AveragePrice>>> {
    let resp = price_service::average_for_product(&state, product_id).await?;
    Ok(Json(resp))
}
