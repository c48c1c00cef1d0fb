// ============================================================================
// MenuQR API - Router
// File: crates/menuqr-api/src/routes.rs
// ============================================================================

use axum::{
    routing::{get, patch, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{analytics, auth, health, menu, promotions, public, qr, settings};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/v1/auth/signup", post(auth::signup))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/menu/{profile_id}", get(public::public_menu))
        .route("/api/v1/menu/{profile_id}/views", post(public::track_menu_view))
        .route("/api/v1/menu/{profile_id}/scans/{qr_code_id}", post(public::track_qr_scan))
        .route("/api/v1/views/{view_id}/items/{item_id}", post(public::track_item_view))
        .route(
            "/api/v1/items/{id}/ratings",
            get(public::item_ratings).post(public::submit_rating),
        )
        .route("/api/v1/languages", get(public::languages));

    // Every handler below extracts `AuthSession` and answers 401 without it.
    let owner_routes = Router::new()
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/password", put(auth::change_password))
        .route("/api/v1/account", axum::routing::delete(auth::delete_account))
        .route("/api/v1/profile", get(auth::get_profile).patch(auth::update_profile))
        .route("/api/v1/dashboard", get(analytics::dashboard))
        .route("/api/v1/analytics/scans", get(analytics::daily_scans))
        .route("/api/v1/analytics/popular", get(analytics::popular_items))
        .route("/api/v1/analytics/views", get(analytics::total_views))
        .route("/api/v1/menu", get(menu::dashboard_menu))
        .route("/api/v1/categories", get(menu::list_categories).post(menu::create_category))
        .route("/api/v1/categories/order", put(menu::set_category_order))
        .route("/api/v1/categories/reorder", post(menu::reorder_categories))
        .route(
            "/api/v1/categories/{id}",
            put(menu::update_category).delete(menu::delete_category),
        )
        .route("/api/v1/categories/{id}/items", get(menu::list_items))
        .route("/api/v1/categories/{id}/items/reorder", post(menu::reorder_items))
        .route("/api/v1/items", post(menu::create_item))
        .route("/api/v1/items/order", put(menu::set_item_order))
        .route("/api/v1/items/{id}", put(menu::update_item).delete(menu::delete_item))
        .route("/api/v1/qr-codes", get(qr::list_qr_codes).post(qr::create_qr_code))
        .route(
            "/api/v1/qr-codes/{id}",
            put(qr::update_qr_code).delete(qr::delete_qr_code),
        )
        .route(
            "/api/v1/promotions",
            get(promotions::list_promotions).post(promotions::create_promotion),
        )
        .route(
            "/api/v1/promotions/{id}",
            put(promotions::update_promotion).delete(promotions::delete_promotion),
        )
        .route("/api/v1/promotions/{id}/active", patch(promotions::toggle_promotion))
        .route(
            "/api/v1/settings",
            get(settings::get_settings).patch(settings::update_settings),
        )
        .route(
            "/api/v1/settings/theme-mode",
            get(settings::get_theme_mode).put(settings::set_theme_mode),
        )
        .route("/api/v1/theme", get(settings::get_theme).put(settings::save_theme));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(public_routes)
        .merge(owner_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
