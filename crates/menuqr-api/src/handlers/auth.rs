// ============================================================================
// MenuQR API - Account Handlers
// File: crates/menuqr-api/src/handlers/auth.rs
// ============================================================================
//! Sign-up, sign-in, sign-out, password, profile and account deletion

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use menuqr_core::domain::{AuthGrant, LoginCredentials, Profile, ProfileUpdate, SignUpCredentials};
use menuqr_core::services::SignedIn;

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthSession;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub password: String,
}

/// POST /api/v1/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignUpCredentials>,
) -> Result<(StatusCode, Json<ApiResponse<AuthGrant>>), ApiError> {
    let grant = state.accounts.sign_up(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(grant))))
}

/// POST /api/v1/auth/login
pub async fn login(State(state): State<AppState>, Json(payload): Json<LoginCredentials>) -> ApiResult<SignedIn> {
    let signed_in = state.accounts.sign_in(payload).await?;
    Ok(Json(ApiResponse::success(signed_in)))
}

/// POST /api/v1/auth/logout
pub async fn logout(State(state): State<AppState>, AuthSession(session): AuthSession) -> Json<ApiResponse<()>> {
    let ok = state.accounts.sign_out(&session).await;
    Json(ApiResponse::from_flag(ok, "Failed to sign out"))
}

/// PUT /api/v1/auth/password
pub async fn change_password(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(payload): Json<ChangePasswordRequest>,
) -> ApiResult<()> {
    state.accounts.change_password(&session, &payload.password).await?;
    Ok(Json(ApiResponse::success(())))
}

/// DELETE /api/v1/account
pub async fn delete_account(State(state): State<AppState>, AuthSession(session): AuthSession) -> ApiResult<()> {
    state.accounts.delete_account(&session).await?;
    Ok(Json(ApiResponse::success(())))
}

/// GET /api/v1/profile
pub async fn get_profile(State(state): State<AppState>, AuthSession(session): AuthSession) -> Json<ApiResponse<Profile>> {
    let profile = state.accounts.profile(&session).await;
    Json(ApiResponse::from_option(profile, "Failed to load profile"))
}

/// PATCH /api/v1/profile
pub async fn update_profile(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(payload): Json<ProfileUpdate>,
) -> ApiResult<Profile> {
    let profile = state.accounts.update_profile(&session, payload).await?;
    Ok(Json(ApiResponse::from_option(profile, "Failed to update profile")))
}
