//! Authentication handlers

use axum::{extract::State, Json};
use shared::models::{LoginInput, UserProfile};

use crate::error::AppResult;
use crate::services::AuthService;
use crate::AppState;

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> AppResult<Json<UserProfile>> {
    let service = AuthService::new(state.db);
    let profile = service.login(input).await?;
    Ok(Json(profile))
}
