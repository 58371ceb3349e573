use axum::{
    Json, Router,
    extract::{Path, State},
};

use crate::{
    dto::evidence::{EvidenceList, UploadEvidenceRequest},
    error::AppResult,
    models::Evidence,
    response::ApiResponse,
    services::evidence_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(upload_evidence))
        .route("/{id}", axum::routing::delete(delete_evidence))
}

#[utoipa::path(
    get,
    path = "/api/clients/{client_id}/evidence",
    params(
        ("client_id" = i32, Path, description = "Client ID")
    ),
    responses(
        (status = 200, description = "The client's evidence files, newest first", body = ApiResponse<EvidenceList>)
    ),
    tag = "Evidence"
)]
pub async fn list_evidence_by_client(
    State(state): State<AppState>,
    Path(client_id): Path<i32>,
) -> AppResult<Json<ApiResponse<EvidenceList>>> {
    let resp = evidence_service::list_evidence_by_client(&state, client_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/evidence",
    request_body = UploadEvidenceRequest,
    responses(
        (status = 200, description = "Evidence metadata stored", body = ApiResponse<Evidence>),
        (status = 404, description = "Client not found"),
    ),
    tag = "Evidence"
)]
pub async fn upload_evidence(
    State(state): State<AppState>,
    Json(payload): Json<UploadEvidenceRequest>,
) -> AppResult<Json<ApiResponse<Evidence>>> {
    let resp = evidence_service::upload_evidence(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/evidence/{id}",
    params(
        ("id" = i32, Path, description = "Evidence ID")
    ),
    responses(
        (status = 200, description = "Deleted evidence"),
        (status = 404, description = "Evidence not found"),
    ),
    tag = "Evidence"
)]
pub async fn delete_evidence(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = evidence_service::delete_evidence(&state, id).await?;
    Ok(Json(resp))
}
