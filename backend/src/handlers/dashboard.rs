//! Dashboard reporting handler

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::reporting::DashboardStats;
use crate::services::ReportingService;
use crate::AppState;

/// GET /dashboard-stats
pub async fn dashboard_stats(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    let stats = ReportingService::new(state.db).dashboard_stats().await?;
    Ok(Json(stats))
}
