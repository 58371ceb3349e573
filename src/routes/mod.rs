use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod clients;
pub mod competitors;
pub mod doc;
pub mod evidence;
pub mod export;
pub mod health;
pub mod history;
pub mod params;
pub mod prices;
pub mod products;
pub mod skus;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/products", products::router())
        .nest("/competitors", competitors::router())
        .nest("/prices", prices::router())
        .nest("/history", history::router())
        .nest("/export", export::router())
        .nest("/clients", clients::router())
        .route(
            "/clients/{client_id}/skus",
            axum::routing::get(skus::list_skus_by_client),
        )
        .route(
            "/clients/{client_id}/evidence",
            axum::routing::get(evidence::list_evidence_by_client),
        )
        .nest("/skus", skus::router())
        .nest("/evidence", evidence::router())
}
