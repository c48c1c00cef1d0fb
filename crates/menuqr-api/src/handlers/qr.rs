use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use menuqr_core::domain::QrCodeDraft;
use menuqr_core::services::QrCodeView;

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthSession;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/qr-codes
pub async fn list_qr_codes(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Json<ApiResponse<Vec<QrCodeView>>> {
    Json(ApiResponse::success(state.qr.list(&session).await))
}

/// POST /api/v1/qr-codes
pub async fn create_qr_code(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(payload): Json<QrCodeDraft>,
) -> Result<(StatusCode, Json<ApiResponse<QrCodeView>>), ApiError> {
    let created = state.qr.create(&session, payload).await?;
    let status = if created.is_some() { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(ApiResponse::from_option(created, "Failed to create QR code"))))
}

/// PUT /api/v1/qr-codes/{id}
pub async fn update_qr_code(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<QrCodeDraft>,
) -> ApiResult<QrCodeView> {
    let updated = state.qr.update(&session, id, payload).await?;
    Ok(Json(ApiResponse::from_option(updated, "Failed to update QR code")))
}

/// DELETE /api/v1/qr-codes/{id}
pub async fn delete_qr_code(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(id): Path<Uuid>,
) -> Json<ApiResponse<()>> {
    let ok = state.qr.delete(&session, id).await;
    Json(ApiResponse::from_flag(ok, "Failed to delete QR code"))
}
