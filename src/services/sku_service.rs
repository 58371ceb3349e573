use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    dto::skus::{CreateSkuRequest, SkuList},
    entity::{
        clients::Entity as Clients,
        skus::{ActiveModel, Column, Entity as Skus, Model as SkuModel},
    },
    error::{AppError, AppResult, all_or_empty},
    models::Sku,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_skus_by_client(
    state: &AppState,
    client_id: i32,
) -> AppResult<ApiResponse<SkuList>> {
    let items = all_or_empty(
        Skus::find()
            .filter(Column::ClientId.eq(client_id))
            .order_by_asc(Column::SortOrder)
            .all(&state.orm)
            .await,
        "skus",
    )?
    .into_iter()
    .map(sku_from_entity)
    .collect();

    Ok(ApiResponse::success(
        "SKUs",
        SkuList { items },
        Some(Meta::empty()),
    ))
}

pub async fn create_sku(
    state: &AppState,
    payload: CreateSkuRequest,
) -> AppResult<ApiResponse<Sku>> {
    if payload.code.trim().is_empty() || payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("SKU code and name are required".into()));
    }

    let client = Clients::find_by_id(payload.client_id).one(&state.orm).await?;
    if client.is_none() {
        return Err(AppError::NotFound);
    }

    let sku = ActiveModel {
        id: NotSet,
        client_id: Set(payload.client_id),
        code: Set(payload.code),
        name: Set(payload.name),
        description: Set(payload.description),
        sort_order: Set(payload.sort_order),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "SKU created",
        sku_from_entity(sku),
        Some(Meta::empty()),
    ))
}

pub async fn delete_sku(state: &AppState, id: i32) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Skus::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    Ok(ApiResponse::ok("Deleted"))
}

fn sku_from_entity(model: SkuModel) -> Sku {
    Sku {
        id: model.id,
        client_id: model.client_id,
        code: model.code,
        name: model.name,
        description: model.description,
        sort_order: model.sort_order,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
