use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use menuqr_core::domain::{PromotionDraft, PromotionWithItems};

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthSession;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub is_active: bool,
}

pub async fn list_promotions(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Json<ApiResponse<Vec<PromotionWithItems>>> {
    Json(ApiResponse::success(state.promotions.list(&session).await))
}

pub async fn create_promotion(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(payload): Json<PromotionDraft>,
) -> Result<(StatusCode, Json<ApiResponse<PromotionWithItems>>), ApiError> {
    let created = state.promotions.save(&session, None, payload).await?;
    let status = if created.is_some() { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(ApiResponse::from_option(created, "Failed to save promotion"))))
}

pub async fn update_promotion(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<PromotionDraft>,
) -> ApiResult<PromotionWithItems> {
    let updated = state.promotions.save(&session, Some(id), payload).await?;
    Ok(Json(ApiResponse::from_option(updated, "Failed to save promotion")))
}

/// PATCH /api/v1/promotions/{id}/active
pub async fn toggle_promotion(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<ToggleRequest>,
) -> ApiResult<()> {
    let ok = state.promotions.set_active(&session, id, payload.is_active).await?;
    Ok(Json(ApiResponse::from_flag(ok, "Failed to update promotion")))
}

pub async fn delete_promotion(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(id): Path<Uuid>,
) -> Json<ApiResponse<()>> {
    let ok = state.promotions.delete(&session, id).await;
    Json(ApiResponse::from_flag(ok, "Failed to delete promotion"))
}
