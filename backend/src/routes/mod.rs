//! Route definitions for the Sistema WMS backend
//!
//! The SPA calls every endpoint at the root, without an /api prefix, so the
//! routes are mounted directly on the main router.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication
        .route("/login", post(handlers::login))
        // Categories
        .route(
            "/categorias",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/categorias/:category_id",
            put(handlers::update_category).delete(handlers::delete_category),
        )
        // Items
        .route("/itens", get(handlers::list_items).post(handlers::create_item))
        .route(
            "/itens/:item_id",
            put(handlers::update_item).delete(handlers::delete_item),
        )
        // Users
        .route(
            "/usuarios",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/usuarios/:user_id",
            put(handlers::update_user).delete(handlers::delete_user),
        )
        // Movements
        .route("/movimentar", post(handlers::record_movement))
        .route("/historico", get(handlers::movement_history))
        // Dashboard
        .route("/dashboard-stats", get(handlers::dashboard_stats))
        // Spreadsheets
        .route("/importar", post(handlers::import_spreadsheet))
        .route("/exportar-itens", get(handlers::export_items))
        .route("/exportar", get(handlers::export_movements))
}
