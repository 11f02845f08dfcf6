//! Stock movement handlers

use axum::{extract::State, Json};
use shared::models::MovementInput;

use crate::error::AppResult;
use crate::services::ledger::{Movement, MovementView};
use crate::services::LedgerService;
use crate::AppState;

/// POST /movimentar
pub async fn record_movement(
    State(state): State<AppState>,
    Json(input): Json<MovementInput>,
) -> AppResult<Json<Movement>> {
    let movement = LedgerService::new(state.db).record(input).await?;
    Ok(Json(movement))
}

/// GET /historico
pub async fn movement_history(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MovementView>>> {
    let history = LedgerService::new(state.db).recent().await?;
    Ok(Json(history))
}
