use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    dto::evidence::{EvidenceList, UploadEvidenceRequest},
    entity::{
        clients::Entity as Clients,
        evidence::{ActiveModel, Column, Entity as EvidenceFiles, Model as EvidenceModel},
    },
    error::{AppError, AppResult, all_or_empty},
    models::Evidence,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_evidence_by_client(
    state: &AppState,
    client_id: i32,
) -> AppResult<ApiResponse<EvidenceList>> {
    let items = all_or_empty(
        EvidenceFiles::find()
            .filter(Column::ClientId.eq(client_id))
            .order_by_desc(Column::UploadedAt)
            .all(&state.orm)
            .await,
        "evidence",
    )?
    .into_iter()
    .map(evidence_from_entity)
    .collect();

    Ok(ApiResponse::success(
        "Evidence",
        EvidenceList { items },
        Some(Meta::empty()),
    ))
}

pub async fn upload_evidence(
    state: &AppState,
    payload: UploadEvidenceRequest,
) -> AppResult<ApiResponse<Evidence>> {
    if payload.file_url.trim().is_empty() || payload.file_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Evidence file URL and name are required".into(),
        ));
    }

    let client = Clients::find_by_id(payload.client_id).one(&state.orm).await?;
    if client.is_none() {
        return Err(AppError::NotFound);
    }

    let evidence = ActiveModel {
        id: NotSet,
        client_id: Set(payload.client_id),
        file_url: Set(payload.file_url),
        file_name: Set(payload.file_name),
        file_type: Set(payload.file_type),
        file_size: Set(payload.file_size),
        description: Set(payload.description),
        uploaded_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Evidence uploaded",
        evidence_from_entity(evidence),
        Some(Meta::empty()),
    ))
}

pub async fn delete_evidence(
    state: &AppState,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = EvidenceFiles::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    Ok(ApiResponse::ok("Deleted"))
}

fn evidence_from_entity(model: EvidenceModel) -> Evidence {
    Evidence {
        id: model.id,
        client_id: model.client_id,
        file_url: model.file_url,
        file_name: model.file_name,
        file_type: model.file_type,
        file_size: model.file_size,
        description: model.description,
        uploaded_at: model.uploaded_at.with_timezone(&Utc),
    }
}
