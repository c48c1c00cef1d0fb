use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use menuqr_core::domain::{DailyMenuScan, DashboardStats, PopularMenuItem};
use menuqr_shared::constants::{DEFAULT_POPULAR_ITEMS_LIMIT, DEFAULT_SCAN_WINDOW_DAYS};

use crate::middleware::AuthSession;
use crate::response::ApiResponse;
use crate::state::AppState;

const MAX_SCAN_WINDOW_DAYS: u32 = 365;
const MAX_POPULAR_ITEMS: usize = 100;

#[derive(Debug, Default, Deserialize)]
pub struct ScansQuery {
    pub days: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PopularQuery {
    pub limit: Option<usize>,
}

/// GET /api/v1/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Json<ApiResponse<DashboardStats>> {
    Json(ApiResponse::success(state.analytics.dashboard(&session).await))
}

/// GET /api/v1/analytics/scans?days=30
pub async fn daily_scans(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Query(query): Query<ScansQuery>,
) -> Json<ApiResponse<Vec<DailyMenuScan>>> {
    let days = query.days.unwrap_or(DEFAULT_SCAN_WINDOW_DAYS).clamp(1, MAX_SCAN_WINDOW_DAYS);
    Json(ApiResponse::success(state.analytics.daily_scans(&session, days).await))
}

/// GET /api/v1/analytics/popular?limit=10
pub async fn popular_items(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Query(query): Query<PopularQuery>,
) -> Json<ApiResponse<Vec<PopularMenuItem>>> {
    let limit = query.limit.unwrap_or(DEFAULT_POPULAR_ITEMS_LIMIT).clamp(1, MAX_POPULAR_ITEMS);
    Json(ApiResponse::success(state.analytics.popular_items(&session, limit).await))
}

/// GET /api/v1/analytics/views
pub async fn total_views(State(state): State<AppState>, AuthSession(session): AuthSession) -> Json<ApiResponse<u64>> {
    Json(ApiResponse::success(state.analytics.total_views(&session).await))
}
