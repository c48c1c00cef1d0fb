// ============================================================================
// MenuQR Core - Theme Customization
// File: crates/menuqr-core/src/domain/theme.rs
// ============================================================================

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::qr_code::validate_color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoPosition {
    Top,
    Left,
    Right,
}

/// Fonts offered by the theme customizer
pub const FONT_OPTIONS: &[&str] = &[
    "Inter",
    "Roboto, sans-serif",
    "Poppins, sans-serif",
    "Montserrat, sans-serif",
    "Lato, sans-serif",
    "\"Playfair Display\", serif",
];

fn validate_font(value: &str) -> Result<(), validator::ValidationError> {
    if FONT_OPTIONS.contains(&value) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("font_family"))
    }
}

/// Visual theme of the public menu (`theme_settings`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ThemeSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<Uuid>,
    #[validate(custom(function = "validate_color", message = "Primary color must be #RRGGBB"))]
    pub primary_color: String,
    #[validate(custom(function = "validate_color", message = "Secondary color must be #RRGGBB"))]
    pub secondary_color: String,
    #[validate(custom(function = "validate_font", message = "Unsupported font"))]
    pub font_family: String,
    pub background_image_url: Option<String>,
    pub logo_position: LogoPosition,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            id: None,
            profile_id: None,
            primary_color: "#0f766e".to_string(),
            secondary_color: "#f3f4f6".to_string(),
            font_family: "Inter".to_string(),
            background_image_url: None,
            logo_position: LogoPosition::Top,
        }
    }
}

impl ThemeSettings {
    pub fn owned_by(mut self, profile_id: Uuid) -> Self {
        self.profile_id = Some(profile_id);
        self
    }
}
