//! Account settings, theme mode and menu theme

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use menuqr_core::domain::{SettingsUpdate, ThemeMode, ThemeSettings, UserSettings};

use crate::error::ApiResult;
use crate::middleware::AuthSession;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeModeBody {
    pub mode: ThemeMode,
}

pub async fn get_settings(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Json<ApiResponse<UserSettings>> {
    let settings = state.settings.settings(&session).await;
    Json(ApiResponse::from_option(settings, "Failed to load settings"))
}

pub async fn update_settings(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(payload): Json<SettingsUpdate>,
) -> Json<ApiResponse<UserSettings>> {
    let settings = state.settings.update_settings(&session, payload).await;
    Json(ApiResponse::from_option(settings, "Failed to save settings"))
}

/// GET /api/v1/settings/theme-mode
///
/// Served from the local cache when this host has one, so the mode can be
/// applied before the full settings load.
pub async fn get_theme_mode(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Json<ApiResponse<ThemeModeBody>> {
    let mode = state.settings.theme_mode(&session).await;
    Json(ApiResponse::success(ThemeModeBody { mode }))
}

/// PUT /api/v1/settings/theme-mode
///
/// The choice is cached locally first, so a failed remote write still
/// leaves the new mode in effect for this profile.
pub async fn set_theme_mode(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(payload): Json<ThemeModeBody>,
) -> Json<ApiResponse<UserSettings>> {
    let settings = state.settings.set_theme_mode(&session, payload.mode).await;
    Json(ApiResponse::from_option(settings, "Theme saved on this device only"))
}

pub async fn get_theme(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Json<ApiResponse<ThemeSettings>> {
    Json(ApiResponse::success(state.settings.theme(&session).await))
}

pub async fn save_theme(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(payload): Json<ThemeSettings>,
) -> ApiResult<ThemeSettings> {
    let theme = state.settings.save_theme(&session, payload).await?;
    Ok(Json(ApiResponse::from_option(theme, "Failed to save theme")))
}
