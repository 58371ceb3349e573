use axum::{Json, Router, extract::State};

use crate::{
    dto::clients::{ClientList, GetOrCreateClientRequest},
    error::AppResult,
    models::Client,
    response::ApiResponse,
    services::client_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::get(list_clients))
        .route("/", axum::routing::post(get_or_create_client))
}

#[utoipa::path(
    get,
    path = "/api/clients",
    responses(
        (status = 200, description = "List clients ordered by name", body = ApiResponse<ClientList>)
    ),
    tag = "Clients"
)]
pub async fn list_clients(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ClientList>>> {
    let resp = client_service::list_clients(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/clients",
    request_body = GetOrCreateClientRequest,
    responses(
        (status = 200, description = "Existing or newly created client", body = ApiResponse<Client>),
        (status = 400, description = "Missing code or name"),
    ),
    tag = "Clients"
)]
pub async fn get_or_create_client(
    State(state): State<AppState>,
    Json(payload): Json<GetOrCreateClientRequest>,
) -> AppResult<Json<ApiResponse<Client>>> {
    let resp = client_service::get_or_create_client(&state, payload).await?;
    Ok(Json(resp))
}
