// ============================================================================
// MenuQR Core - User Settings
// File: crates/menuqr-core/src/domain/settings.rs
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    Light,
    Dark,
    System,
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::System
    }
}

/// Per-account preferences (`user_settings`, keyed by profile id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub id: Uuid,
    pub email_notifications: bool,
    pub whatsapp_support: bool,
    pub theme: ThemeMode,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row inserted the first time settings are read
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUserSettings {
    pub id: Uuid,
    pub email_notifications: bool,
    pub whatsapp_support: bool,
    pub theme: ThemeMode,
}

impl NewUserSettings {
    pub fn defaults_for(profile_id: Uuid) -> Self {
        Self {
            id: profile_id,
            email_notifications: true,
            whatsapp_support: false,
            theme: ThemeMode::Light,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_notifications: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp_support: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeMode>,
}
