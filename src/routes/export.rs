use axum::{
    Router,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};

use crate::{
    error::AppResult,
    report,
    routes::params::{ExportQuery, HistoryQuery},
    services::{history_service, price_service},
    state::AppState,
};

const PDF_MIME: &str = "application/pdf";
const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/comparison/pdf", get(comparison_pdf))
        .route("/comparison/excel", get(comparison_excel))
        .route("/history/pdf", get(history_pdf))
        .route("/history/excel", get(history_excel))
}

#[utoipa::path(
    get,
    path = "/api/export/comparison/pdf",
    responses(
        (status = 200, description = "Comparison report as a PDF download")
    ),
    tag = "Export"
)]
pub async fn comparison_pdf(State(state): State<AppState>) -> AppResult<Response> {
    let rows = price_service::comparison_rows(&state).await?;
    let generated_at = Utc::now();
    let bytes = report::pdf::comparison_pdf(&rows, generated_at)?;
    Ok(attachment(
        bytes,
        &stamped_filename("comparacao-precos", "pdf", generated_at),
        PDF_MIME,
    ))
}

#[utoipa::path(
    get,
    path = "/api/export/comparison/excel",
    responses(
        (status = 200, description = "Comparison report as an Excel download")
    ),
    tag = "Export"
)]
pub async fn comparison_excel(State(state): State<AppState>) -> AppResult<Response> {
    let rows = price_service::comparison_rows(&state).await?;
    let generated_at = Utc::now();
    let bytes = report::excel::comparison_excel(&rows, generated_at)?;
    Ok(attachment(
        bytes,
        &stamped_filename("comparacao-precos", "xlsx", generated_at),
        XLSX_MIME,
    ))
}

#[utoipa::path(
    get,
    path = "/api/export/history/pdf",
    params(
        ("days" = Option<i64>, Query, description = "Only changes within the last N days"),
    ),
    responses(
        (status = 200, description = "History report as a PDF download")
    ),
    tag = "Export"
)]
pub async fn history_pdf(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let entries = history_service::history_entries(&state, &history_filter(query)).await?;
    let generated_at = Utc::now();
    let bytes = report::pdf::history_pdf(&entries, generated_at)?;
    Ok(attachment(
        bytes,
        &stamped_filename("historico-precos", "pdf", generated_at),
        PDF_MIME,
    ))
}

#[utoipa::path(
    get,
    path = "/api/export/history/excel",
    params(
        ("days" = Option<i64>, Query, description = "Only changes within the last N days"),
    ),
    responses(
        (status = 200, description = "History report as an Excel download")
    ),
    tag = "Export"
)]
pub async fn history_excel(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let entries = history_service::history_entries(&state, &history_filter(query)).await?;
    let generated_at = Utc::now();
    let bytes = report::excel::history_excel(&entries, generated_at)?;
    Ok(attachment(
        bytes,
        &stamped_filename("historico-precos", "xlsx", generated_at),
        XLSX_MIME,
    ))
}

fn history_filter(query: ExportQuery) -> HistoryQuery {
    HistoryQuery {
        product_id: None,
        competitor_id: None,
        days: query.days,
    }
}

fn stamped_filename(stem: &str, ext: &str, at: DateTime<Utc>) -> String {
    format!("{stem}-{}.{ext}", at.format("%Y-%m-%d"))
}

fn attachment(bytes: Vec<u8>, filename: &str, content_type: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}
