//! Application services
//!
//! Services wrap the repository ports and are where backend failures are
//! turned into values a screen can render.

pub mod account_service;
pub mod analytics_service;
pub mod catalog_service;
pub mod composer;
pub mod menu_service;
pub mod promotion_service;
pub mod qr_service;
pub mod renderer;
pub mod reorder;
pub mod settings_service;

pub use account_service::{AccountService, SignedIn};
pub use analytics_service::AnalyticsService;
pub use catalog_service::{LanguageService, RatingService};
pub use composer::{compose_menu, compose_public, compose_public_menu};
pub use menu_service::MenuService;
pub use promotion_service::PromotionService;
pub use qr_service::{QrCodeView, QrService};
pub use renderer::{spice_indicator, ItemDetail, MenuState, PriceDisplay, PublicMenuRenderer, RenderedMenu};
pub use reorder::{ReorderCoordinator, ReorderEngine, ReorderGesture, ReorderOutcome, ReorderReport, ReorderState};
pub use settings_service::SettingsService;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use menuqr_security::{Claims, Session};
    use uuid::Uuid;

    pub fn session() -> Session {
        Session {
            access_token: "test-token".to_string(),
            profile_id: Uuid::new_v4(),
            email: Some("owner@bistro.com".to_string()),
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    pub fn access_token_for(user_id: Uuid) -> String {
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            iat: None,
            email: Some("owner@bistro.com".to_string()),
            role: Some("authenticated".to_string()),
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test-secret")).unwrap()
    }
}
