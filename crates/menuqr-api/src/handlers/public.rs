// ============================================================================
// MenuQR API - Public Menu Handlers
// File: crates/menuqr-api/src/handlers/public.rs
// ============================================================================
//! Diner-facing endpoints. None of these require a session.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use menuqr_core::domain::{Language, MenuViewMetadata, NewRating, RatingSummary};
use menuqr_core::services::{PublicMenuRenderer, RenderedMenu};

use crate::error::{ApiError, ApiResult};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    /// Category tab to show instead of the first one.
    pub category: Option<Uuid>,
    /// Item whose detail panel is open.
    pub item: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct TrackedView {
    pub view_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    pub customer_name: String,
}

fn header_value(headers: &HeaderMap, name: impl header::AsHeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Visitor details recorded with a menu view.
pub fn view_metadata(headers: &HeaderMap) -> MenuViewMetadata {
    let ip_address = header_value(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next().map(|ip| ip.trim().to_string()))
        .or_else(|| header_value(headers, "x-real-ip"));
    MenuViewMetadata {
        ip_address,
        user_agent: header_value(headers, header::USER_AGENT),
        referrer: header_value(headers, header::REFERER),
    }
}

/// GET /api/v1/menu/{profile_id}
pub async fn public_menu(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
    Query(query): Query<MenuQuery>,
) -> Json<ApiResponse<RenderedMenu>> {
    let mut renderer = PublicMenuRenderer::new(state.menu.public_menu(profile_id).await);
    if let Some(category) = query.category {
        renderer.select_category(category);
    }
    if let Some(item) = query.item {
        renderer.select_item(item);
    }
    Json(ApiResponse::success(renderer.render()))
}

/// POST /api/v1/menu/{profile_id}/views
pub async fn track_menu_view(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
    headers: HeaderMap,
) -> (StatusCode, Json<ApiResponse<TrackedView>>) {
    match state.analytics.track_menu_view(profile_id, view_metadata(&headers)).await {
        Some(view_id) => (StatusCode::CREATED, Json(ApiResponse::success(TrackedView { view_id }))),
        None => (StatusCode::OK, Json(ApiResponse::notice("Menu view was not recorded"))),
    }
}

/// POST /api/v1/menu/{profile_id}/scans/{qr_code_id}
pub async fn track_qr_scan(
    State(state): State<AppState>,
    Path((profile_id, qr_code_id)): Path<(Uuid, Uuid)>,
    headers: HeaderMap,
) -> Json<ApiResponse<()>> {
    let ok = state
        .analytics
        .track_qr_scan(qr_code_id, profile_id, view_metadata(&headers))
        .await;
    Json(ApiResponse::from_flag(ok, "QR scan was not recorded"))
}

/// POST /api/v1/views/{view_id}/items/{item_id}
pub async fn track_item_view(
    State(state): State<AppState>,
    Path((view_id, item_id)): Path<(Uuid, Uuid)>,
) -> Json<ApiResponse<()>> {
    let ok = state.analytics.track_item_view(item_id, view_id).await;
    Json(ApiResponse::from_flag(ok, "Item view was not recorded"))
}

/// GET /api/v1/items/{id}/ratings
pub async fn item_ratings(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
) -> Json<ApiResponse<RatingSummary>> {
    Json(ApiResponse::success(state.ratings.summary(item_id).await))
}

/// POST /api/v1/items/{id}/ratings
pub async fn submit_rating(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(payload): Json<RatingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RatingSummary>>), ApiError> {
    let rating = NewRating {
        menu_item_id: item_id,
        rating: payload.rating,
        comment: payload.comment,
        customer_name: payload.customer_name,
    };
    let summary = state.ratings.submit(rating).await?;
    let status = if summary.is_some() { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(ApiResponse::from_option(summary, "Failed to submit rating"))))
}

/// GET /api/v1/languages
pub async fn languages(State(state): State<AppState>) -> ApiResult<Vec<Language>> {
    Ok(Json(ApiResponse::success(state.languages.languages().await)))
}
