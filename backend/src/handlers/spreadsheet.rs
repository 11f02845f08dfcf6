//! CSV import/export handlers

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::error::{AppError, AppResult};
use crate::services::spreadsheet::ImportSummary;
use crate::services::SpreadsheetService;
use crate::AppState;

/// POST /importar
///
/// Expects the CSV file in a multipart field named `arquivo`.
pub async fn import_spreadsheet(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ImportSummary>> {
    let mut file = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| AppError::Validation {
        field: "multipart".into(),
        message: e.to_string(),
    })? {
        if field.name() == Some("arquivo") {
            let bytes = field.bytes().await.map_err(|e| AppError::Validation {
                field: "arquivo".into(),
                message: e.to_string(),
            })?;
            file = Some(bytes);
        }
    }

    let bytes = file.ok_or_else(|| AppError::Validation {
        field: "arquivo".into(),
        message: "arquivo obrigatório".into(),
    })?;

    let summary = SpreadsheetService::new(state.db).import(&bytes).await?;
    Ok(Json(summary))
}

/// GET /exportar-itens
pub async fn export_items(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let csv = SpreadsheetService::new(state.db).export_items().await?;
    Ok(csv_download("estoque.csv", csv))
}

/// GET /exportar
pub async fn export_movements(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let csv = SpreadsheetService::new(state.db).export_movements().await?;
    Ok(csv_download("relatorio_movimentacoes.csv", csv))
}

fn csv_download(filename: &str, body: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
}
