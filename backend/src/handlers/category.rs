//! Category handlers

use axum::{
    extract::{Path, State},
    Json,
};
use shared::models::CategoryInput;

use crate::error::AppResult;
use crate::services::category::Category;
use crate::services::CategoryService;
use crate::AppState;

/// GET /categorias
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = CategoryService::new(state.db).list().await?;
    Ok(Json(categories))
}

/// POST /categorias
pub async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<CategoryInput>,
) -> AppResult<Json<Category>> {
    let category = CategoryService::new(state.db).create(input).await?;
    Ok(Json(category))
}

/// PUT /categorias/:category_id
pub async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
    Json(input): Json<CategoryInput>,
) -> AppResult<Json<Category>> {
    let category = CategoryService::new(state.db)
        .rename(category_id, input)
        .await?;
    Ok(Json(category))
}

/// DELETE /categorias/:category_id
pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> AppResult<Json<()>> {
    CategoryService::new(state.db).delete(category_id).await?;
    Ok(Json(()))
}
