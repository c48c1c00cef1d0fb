// ============================================================================
// MenuQR Core - Profile & Account Types
// File: crates/menuqr-core/src/domain/profile.rs
// ============================================================================

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Business account and its public branding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub business_name: Option<String>,
    pub address: Option<String>,
    pub business_hours: Option<String>,
    pub contact_info: Option<String>,
    pub logo_url: Option<String>,
    pub cover_image_url: Option<String>,
}

/// Partial profile update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 200, message = "Business name too long"))]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "Address too long"))]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "Business hours too long"))]
    pub business_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "Contact info too long"))]
    pub contact_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self == &ProfileUpdate::default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginCredentials {
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignUpCredentials {
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub business_hours: Option<String>,
    #[serde(default)]
    pub contact_info: Option<String>,
}

impl SignUpCredentials {
    /// Business details written to the profile once the account exists.
    pub fn profile_update(&self) -> ProfileUpdate {
        let clean = |v: &Option<String>| v.as_ref().map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        ProfileUpdate {
            business_name: clean(&self.business_name),
            address: clean(&self.address),
            business_hours: clean(&self.business_hours),
            contact_info: clean(&self.contact_info),
            ..ProfileUpdate::default()
        }
    }
}

/// Tokens handed out by the auth backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
}

/// Result of sign-up or sign-in. Sign-up yields no tokens while the email
/// address awaits confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthGrant {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub tokens: Option<AuthTokens>,
}
