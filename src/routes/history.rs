use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::history::HistoryList,
    error::AppResult,
    response::ApiResponse,
    routes::params::HistoryQuery,
    services::history_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_history))
}

#[utoipa::path(
    get,
    path = "/api/history",
    params(
        ("product_id" = Option<i32>, Query, description = "Restrict to one product"),
        ("competitor_id" = Option<i32>, Query, description = "Restrict to one competitor"),
        ("days" = Option<i64>, Query, description = "Only changes within the last N days"),
    ),
    responses(
        (status = 200, description = "Audit trail, newest first", body = ApiResponse<HistoryList>)
    ),
    tag = "History"
)]
pub async fn list_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<ApiResponse<HistoryList>>> {
    let resp = history_service::list_history(&state, query).await?;
    Ok(Json(resp))
}
