// ============================================================================
// MenuQR Core - QR Code Entity
// File: crates/menuqr-core/src/domain/qr_code.rs
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use menuqr_shared::constants::{DEFAULT_QR_BACKGROUND, DEFAULT_QR_FOREGROUND};
use menuqr_shared::utils::is_hex_color;

/// QR code configuration owned by a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrCode {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub custom_path: Option<String>,
    pub foreground_color: String,
    pub background_color: String,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QrCode {
    /// Path segment diners land on: the custom slug if set, else the id.
    pub fn menu_slug(&self) -> String {
        self.custom_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.id.to_string())
    }

    pub fn menu_url(&self, public_base_url: &str) -> String {
        format!("{}/menu/{}", public_base_url.trim_end_matches('/'), self.menu_slug())
    }
}

pub(crate) fn validate_color(value: &str) -> Result<(), ValidationError> {
    if is_hex_color(value) {
        Ok(())
    } else {
        Err(ValidationError::new("hex_color"))
    }
}

fn validate_slug(value: &str) -> Result<(), ValidationError> {
    let ok = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if ok {
        Ok(())
    } else {
        Err(ValidationError::new("custom_path"))
    }
}

fn default_foreground() -> String {
    DEFAULT_QR_FOREGROUND.to_string()
}

fn default_background() -> String {
    DEFAULT_QR_BACKGROUND.to_string()
}

/// Owner input for a QR code
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QrCodeDraft {
    #[validate(length(min = 1, max = 100, message = "QR code name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "Description too long"))]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_slug", message = "Custom path may only contain lowercase letters, digits and dashes"))]
    pub custom_path: Option<String>,

    #[serde(default = "default_foreground")]
    #[validate(custom(function = "validate_color", message = "Foreground color must be #RRGGBB"))]
    pub foreground_color: String,

    #[serde(default = "default_background")]
    #[validate(custom(function = "validate_color", message = "Background color must be #RRGGBB"))]
    pub background_color: String,

    #[serde(default)]
    pub logo_url: Option<String>,
}

impl QrCodeDraft {
    pub fn normalized(self) -> Result<Self, validator::ValidationErrors> {
        let draft = Self {
            name: self.name.trim().to_string(),
            description: self.description.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()),
            custom_path: self
                .custom_path
                .map(|p| p.trim().trim_matches('/').to_lowercase())
                .filter(|p| !p.is_empty()),
            foreground_color: self.foreground_color,
            background_color: self.background_color,
            logo_url: self.logo_url.filter(|u| !u.trim().is_empty()),
        };
        draft.validate()?;
        Ok(draft)
    }
}

/// Insert payload
#[derive(Debug, Clone, Serialize)]
pub struct NewQrCode {
    pub profile_id: Uuid,
    #[serde(flatten)]
    pub draft: QrCodeDraft,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qr(custom_path: Option<&str>) -> QrCode {
        QrCode {
            id: Uuid::parse_str("0b6c1f3e-8d7a-4c1b-9a8e-2f4d5c6b7a89").unwrap(),
            profile_id: Uuid::new_v4(),
            name: "Table cards".into(),
            description: None,
            custom_path: custom_path.map(str::to_string),
            foreground_color: "#000000".into(),
            background_color: "#FFFFFF".into(),
            logo_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_menu_url_prefers_custom_path() {
        assert_eq!(qr(Some("main-menu")).menu_url("https://menuqr.com/"), "https://menuqr.com/menu/main-menu");
        assert_eq!(
            qr(None).menu_url("https://menuqr.com"),
            "https://menuqr.com/menu/0b6c1f3e-8d7a-4c1b-9a8e-2f4d5c6b7a89"
        );
    }

    #[test]
    fn test_draft_validation() {
        let ok: QrCodeDraft = serde_json::from_value(serde_json::json!({
            "name": " Entrance ",
            "custom_path": "/Main-Menu/"
        }))
        .unwrap();
        let ok = ok.normalized().unwrap();
        assert_eq!(ok.custom_path.as_deref(), Some("main-menu"));
        assert_eq!(ok.foreground_color, "#000000");

        let bad: QrCodeDraft = serde_json::from_value(serde_json::json!({
            "name": "Entrance",
            "foreground_color": "red"
        }))
        .unwrap();
        assert!(bad.normalized().is_err());
    }
}
