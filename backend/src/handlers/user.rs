//! User account handlers

use axum::{
    extract::{Path, State},
    Json,
};
use shared::models::UserInput;

use crate::error::AppResult;
use crate::services::user::UserView;
use crate::services::UserService;
use crate::AppState;

/// GET /usuarios
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserView>>> {
    let users = UserService::new(state.db).list().await?;
    Ok(Json(users))
}

/// POST /usuarios
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<UserInput>,
) -> AppResult<Json<UserView>> {
    let user = UserService::new(state.db).create(input).await?;
    Ok(Json(user))
}

/// PUT /usuarios/:user_id
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(input): Json<UserInput>,
) -> AppResult<Json<UserView>> {
    let user = UserService::new(state.db).update(user_id, input).await?;
    Ok(Json(user))
}

/// DELETE /usuarios/:user_id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<()>> {
    UserService::new(state.db).delete(user_id).await?;
    Ok(Json(()))
}
