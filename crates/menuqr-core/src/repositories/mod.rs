//! Repository traits (ports)
//!
//! Every authenticated call takes the caller's [`Session`] explicitly.

pub mod account_repository;
pub mod analytics_repository;
pub mod catalog_repository;
pub mod menu_repository;
pub mod promotion_repository;
pub mod qr_code_repository;
pub mod settings_repository;

pub use account_repository::AccountRepository;
pub use analytics_repository::AnalyticsRepository;
pub use catalog_repository::{LanguageRepository, RatingRepository};
pub use menu_repository::MenuRepository;
pub use promotion_repository::PromotionRepository;
pub use qr_code_repository::{QrCodeRepository, QrImageRenderer};
pub use settings_repository::{SettingsRepository, ThemePreferenceCache};

#[cfg(any(test, feature = "mocks"))]
pub use account_repository::MockAccountRepository;
#[cfg(any(test, feature = "mocks"))]
pub use analytics_repository::MockAnalyticsRepository;
#[cfg(any(test, feature = "mocks"))]
pub use catalog_repository::{MockLanguageRepository, MockRatingRepository};
#[cfg(any(test, feature = "mocks"))]
pub use menu_repository::MockMenuRepository;
#[cfg(any(test, feature = "mocks"))]
pub use promotion_repository::MockPromotionRepository;
#[cfg(any(test, feature = "mocks"))]
pub use qr_code_repository::{MockQrCodeRepository, MockQrImageRenderer};
#[cfg(any(test, feature = "mocks"))]
pub use settings_repository::{MockSettingsRepository, MockThemePreferenceCache};

pub use menuqr_security::Session;
