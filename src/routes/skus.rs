use axum::{
    Json, Router,
    extract::{Path, State},
};

use crate::{
    dto::skus::{CreateSkuRequest, SkuList},
    error::AppResult,
    models::Sku,
    response::ApiResponse,
    services::sku_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(create_sku))
        .route("/{id}", axum::routing::delete(delete_sku))
}

#[utoipa::path(
    get,
    path = "/api/clients/{client_id}/skus",
    params(
        ("client_id" = i32, Path, description = "Client ID")
    ),
    responses(
        (status = 200, description = "The client's SKUs in display order", body = ApiResponse<SkuList>)
    ),
    tag = "SKUs"
)]
pub async fn list_skus_by_client(
    State(state): State<AppState>,
    Path(client_id): Path<i32>,
) -> AppResult<Json<ApiResponse<SkuList>>> {
    let resp = sku_service::list_skus_by_client(&state, client_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/skus",
    request_body = CreateSkuRequest,
    responses(
        (status = 200, description = "SKU created", body = ApiResponse<Sku>),
        (status = 404, description = "Client not found"),
    ),
    tag = "SKUs"
)]
pub async fn create_sku(
    State(state): State<AppState>,
    Json(payload): Json<CreateSkuRequest>,
) -> AppResult<Json<ApiResponse<Sku>>> {
    let resp = sku_service::create_sku(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/skus/{id}",
    params(
        ("id" = i32, Path, description = "SKU ID")
    ),
    responses(
        (status = 200, description = "Deleted SKU"),
        (status = 404, description = "SKU not found"),
    ),
    tag = "SKUs"
)]
pub async fn delete_sku(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = sku_service::delete_sku(&state, id).await?;
    Ok(Json(resp))
}
