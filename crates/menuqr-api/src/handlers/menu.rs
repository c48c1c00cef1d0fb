// ============================================================================
// MenuQR API - Menu Management Handlers
// File: crates/menuqr-api/src/handlers/menu.rs
// ============================================================================
//! Owner-side categories, items and ordering

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use menuqr_core::domain::{Category, CategoryDraft, CategoryView, MenuItem, MenuItemDraft, OrderUpdate};
use menuqr_core::services::{ReorderGesture, ReorderOutcome, ReorderReport};

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthSession;
use crate::response::ApiResponse;
use crate::state::AppState;

const REORDER_REVERTED: &str = "Failed to save the new order; the previous order was restored";
const REORDER_UNAVAILABLE: &str = "Failed to load the menu; the order was not changed";

fn reorder_response<T: serde::Serialize>(report: ReorderReport<T>) -> Json<ApiResponse<ReorderReport<T>>> {
    Json(match report.outcome {
        ReorderOutcome::Saved => ApiResponse::success(report),
        ReorderOutcome::Reverted => {
            let mut response = ApiResponse::success(report);
            response.notice = Some(REORDER_REVERTED.to_string());
            response
        }
        ReorderOutcome::Unavailable => ApiResponse::notice(REORDER_UNAVAILABLE),
    })
}

/// GET /api/v1/menu
pub async fn dashboard_menu(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Json<ApiResponse<Vec<CategoryView>>> {
    Json(ApiResponse::success(state.menu.dashboard_menu(&session).await))
}

// ----------------------------------------------------------------------------
// Categories
// ----------------------------------------------------------------------------

pub async fn list_categories(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Json<ApiResponse<Vec<Category>>> {
    Json(ApiResponse::success(state.menu.list_categories(&session).await))
}

pub async fn create_category(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(payload): Json<CategoryDraft>,
) -> Result<(StatusCode, Json<ApiResponse<Category>>), ApiError> {
    let created = state.menu.create_category(&session, payload).await?;
    let status = if created.is_some() { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(ApiResponse::from_option(created, "Failed to create category"))))
}

pub async fn update_category(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryDraft>,
) -> ApiResult<Category> {
    let updated = state.menu.update_category(&session, id, payload).await?;
    Ok(Json(ApiResponse::from_option(updated, "Failed to update category")))
}

pub async fn delete_category(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(id): Path<Uuid>,
) -> Json<ApiResponse<()>> {
    let ok = state.menu.delete_category(&session, id).await;
    Json(ApiResponse::from_flag(ok, "Failed to delete category"))
}

/// POST /api/v1/categories/reorder
pub async fn reorder_categories(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(gesture): Json<ReorderGesture>,
) -> ApiResult<ReorderReport<Category>> {
    let report = state.reorder.reorder_categories(&session, &gesture).await?;
    Ok(reorder_response(report))
}

/// PUT /api/v1/categories/order
pub async fn set_category_order(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(updates): Json<Vec<OrderUpdate>>,
) -> ApiResult<()> {
    let ok = state.menu.reorder_categories(&session, &updates).await?;
    Ok(Json(ApiResponse::from_flag(ok, "Failed to update category order")))
}

// ----------------------------------------------------------------------------
// Items
// ----------------------------------------------------------------------------

pub async fn list_items(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(category_id): Path<Uuid>,
) -> Json<ApiResponse<Vec<MenuItem>>> {
    Json(ApiResponse::success(state.menu.list_items(&session, category_id).await))
}

pub async fn create_item(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(payload): Json<MenuItemDraft>,
) -> Result<(StatusCode, Json<ApiResponse<MenuItem>>), ApiError> {
    let created = state.menu.create_item(&session, payload).await?;
    let status = if created.is_some() { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(ApiResponse::from_option(created, "Failed to create menu item"))))
}

pub async fn update_item(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<MenuItemDraft>,
) -> ApiResult<MenuItem> {
    let updated = state.menu.update_item(&session, id, payload).await?;
    Ok(Json(ApiResponse::from_option(updated, "Failed to update menu item")))
}

pub async fn delete_item(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(id): Path<Uuid>,
) -> Json<ApiResponse<()>> {
    let ok = state.menu.delete_item(&session, id).await;
    Json(ApiResponse::from_flag(ok, "Failed to delete menu item"))
}

/// POST /api/v1/categories/{id}/items/reorder
pub async fn reorder_items(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(category_id): Path<Uuid>,
    Json(gesture): Json<ReorderGesture>,
) -> ApiResult<ReorderReport<MenuItem>> {
    let report = state.reorder.reorder_items(&session, category_id, &gesture).await?;
    Ok(reorder_response(report))
}

/// PUT /api/v1/items/order
pub async fn set_item_order(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(updates): Json<Vec<OrderUpdate>>,
) -> ApiResult<()> {
    let ok = state.menu.reorder_items(&session, &updates).await?;
    Ok(Json(ApiResponse::from_flag(ok, "Failed to update menu item order")))
}
