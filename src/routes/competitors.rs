use axum::{Json, Router, extract::State, routing::get};
use sea_orm::{EntityTrait, QueryOrder};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    entity::competitors::{Column, Entity as Competitors},
    error::{AppResult, all_or_empty},
    models::Competitor,
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct CompetitorList {
    #[schema(value_type = Vec<Competitor>)]
    pub items: Vec<Competitor>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_competitors))
}

#[utoipa::path(
    get,
    path = "/api/competitors",
    responses(
        (status = 200, description = "The four fixed competitors in display order", body = ApiResponse<CompetitorList>)
    ),
    tag = "Competitors"
)]
pub async fn list_competitors(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CompetitorList>>> {
    let items = all_or_empty(
        Competitors::find()
            .order_by_asc(Column::Id)
            .all(&state.orm)
            .await,
        "competitors",
    )?
    .into_iter()
    .map(|c| Competitor {
        id: c.id,
        name: c.name,
        code: c.code,
    })
    .collect();

    Ok(Json(ApiResponse::success(
        "Competitors",
        CompetitorList { items },
        Some(Meta::empty()),
    )))
}
