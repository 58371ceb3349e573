use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};

use crate::{
    dto::clients::{ClientList, GetOrCreateClientRequest},
    entity::clients::{ActiveModel, Column, Entity as Clients, Model as ClientModel},
    error::{AppError, AppResult, all_or_empty},
    models::Client,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_clients(state: &AppState) -> AppResult<ApiResponse<ClientList>> {
    let items = all_or_empty(
        Clients::find().order_by_asc(Column::Name).all(&state.orm).await,
        "clients",
    )?
    .into_iter()
    .map(client_from_entity)
    .collect();

    Ok(ApiResponse::success(
        "Clients",
        ClientList { items },
        Some(Meta::empty()),
    ))
}

/// Keyed on code; the first registration wins and later calls return it
/// unchanged, whatever name they carry.
pub async fn get_or_create_client(
    state: &AppState,
    payload: GetOrCreateClientRequest,
) -> AppResult<ApiResponse<Client>> {
    if payload.code.trim().is_empty() {
        return Err(AppError::BadRequest("Client code is required".into()));
    }
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Client name is required".into()));
    }

    let existing = Clients::find()
        .filter(Column::Code.eq(payload.code.clone()))
        .one(&state.orm)
        .await?;
    if let Some(client) = existing {
        return Ok(ApiResponse::success(
            "Client",
            client_from_entity(client),
            None,
        ));
    }

    let active = ActiveModel {
        id: NotSet,
        code: Set(payload.code.clone()),
        name: Set(payload.name),
        description: Set(payload.description),
        created_at: NotSet,
        updated_at: NotSet,
    };

    let client = match active.insert(&state.orm).await {
        Ok(client) => client,
        // Two concurrent calls with a fresh code race on the unique key;
        // the loser picks up the row the winner created.
        Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            let client = Clients::find()
                .filter(Column::Code.eq(payload.code))
                .one(&state.orm)
                .await?;
            match client {
                Some(c) => c,
                None => return Err(err.into()),
            }
        }
        Err(err) => return Err(err.into()),
    };

    Ok(ApiResponse::success(
        "Client created",
        client_from_entity(client),
        Some(Meta::empty()),
    ))
}

fn client_from_entity(model: ClientModel) -> Client {
    Client {
        id: model.id,
        code: model.code,
        name: model.name,
        description: model.description,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
